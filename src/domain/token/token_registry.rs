//! Token registry keyed by canonical address

use std::collections::HashMap;
use tracing::warn;

use crate::shared::errors::SwapError;
use crate::shared::types::{parse_address, Address, ChainId, Token};

/// Immutable-after-startup catalog of known tokens.
///
/// Built once with `register` and then shared behind an `Arc`; every read
/// takes `&self`, so concurrent lookups need no locking.
#[derive(Debug, Default, Clone)]
pub struct TokenRegistry {
    tokens: HashMap<Address, Token>,
    by_symbol: HashMap<String, Address>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token, rejecting conflicting metadata for a known address.
    ///
    /// Re-registering identical decimals and chain id returns the token that
    /// is already stored.
    pub fn register(
        &mut self,
        address: Address,
        decimals: u8,
        symbol: &str,
        name: &str,
        chain_id: ChainId,
    ) -> Result<Token, SwapError> {
        if let Some(existing) = self.tokens.get(&address) {
            if existing.decimals() != decimals || existing.chain_id() != chain_id {
                return Err(SwapError::InconsistentTokenMetadata(address));
            }
            return Ok(existing.clone());
        }

        let token = Token::new(chain_id, address, decimals, symbol, name);
        let symbol_key = symbol.to_uppercase();
        match self.by_symbol.get(&symbol_key) {
            Some(owner) => warn!(
                "Symbol {} already registered to {}, {} is reachable by address only",
                symbol, owner, address
            ),
            None => {
                self.by_symbol.insert(symbol_key, address);
            }
        }
        self.tokens.insert(address, token.clone());
        Ok(token)
    }

    pub fn lookup(&self, address: &Address) -> Result<Token, SwapError> {
        self.tokens
            .get(address)
            .cloned()
            .ok_or_else(|| SwapError::TokenNotFound(address.to_string()))
    }

    pub fn lookup_symbol(&self, symbol: &str) -> Result<Token, SwapError> {
        self.by_symbol
            .get(&symbol.to_uppercase())
            .and_then(|address| self.tokens.get(address))
            .cloned()
            .ok_or_else(|| SwapError::TokenNotFound(symbol.to_string()))
    }

    /// Accepts either a hex address or a symbol
    pub fn resolve(&self, address_or_symbol: &str) -> Result<Token, SwapError> {
        match parse_address(address_or_symbol) {
            Ok(address) => self.lookup(&address),
            Err(_) => self.lookup_symbol(address_or_symbol),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.values()
    }
}
