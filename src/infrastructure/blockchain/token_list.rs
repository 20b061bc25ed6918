//! Token list loading into a registry

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::domain::token::TokenRegistry;
use crate::shared::errors::AppError;
use crate::shared::types::{parse_address, ChainId};

#[derive(Debug, Deserialize)]
struct TokenList {
    tokens: Vec<TokenListEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenListEntry {
    chain_id: ChainId,
    address: String,
    decimals: u8,
    symbol: String,
    #[serde(default)]
    name: String,
}

pub struct TokenListLoader;

impl TokenListLoader {
    pub fn from_file<P: AsRef<Path>>(path: P, chain_id: ChainId) -> Result<TokenRegistry, AppError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::TokenListError(format!("Failed to read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&content, chain_id)
    }

    /// Entries for other chains are skipped
    pub fn from_json(content: &str, chain_id: ChainId) -> Result<TokenRegistry, AppError> {
        let list: TokenList = serde_json::from_str(content)
            .map_err(|e| AppError::TokenListError(format!("Failed to parse token list: {}", e)))?;

        let mut registry = TokenRegistry::new();
        let mut skipped = 0usize;
        for entry in list.tokens {
            if entry.chain_id != chain_id {
                skipped += 1;
                continue;
            }
            let address = parse_address(&entry.address)
                .map_err(|e| AppError::TokenListError(format!("{} ({})", e, entry.symbol)))?;
            registry.register(address, entry.decimals, &entry.symbol, &entry.name, entry.chain_id)?;
        }

        info!(
            "Loaded {} tokens for chain {} ({} entries for other chains skipped)",
            registry.len(),
            chain_id,
            skipped
        );
        Ok(registry)
    }
}
