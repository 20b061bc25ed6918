use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::slippage::SlippageTolerance;
use crate::shared::errors::AppError;
use crate::shared::types::{Address, ChainId};

#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub chain_id: ChainId,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    pub address: Address,
    pub factory_address: Address,
    /// Wrapped native asset; trades touching it use the router's ETH methods
    pub wrapped_native: Option<Address>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    pub from: Address,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradeConfig {
    #[serde(default = "default_allowed_slippage")]
    pub allowed_slippage: String,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: i64,
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
    pub gas_limit: u64,
    pub gas_limit_ceiling: u64,
    pub gas_price_wei: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
    pub list_path: String,
}

/// Top-level configuration loaded from Config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct SwapConfig {
    pub network: NetworkConfig,
    pub router: RouterConfig,
    pub wallet: WalletConfig,
    pub trade: TradeConfig,
    pub tokens: TokensConfig,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_allowed_slippage() -> String {
    "1/100".to_string()
}

fn default_ttl_seconds() -> i64 {
    1800
}

fn default_max_hops() -> usize {
    1
}

impl SwapConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, AppError> {
        let config: SwapConfig = toml::from_str(content)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn slippage(&self) -> Result<SlippageTolerance, AppError> {
        self.trade
            .allowed_slippage
            .parse()
            .map_err(|e| AppError::ConfigError(format!("trade.allowed_slippage: {}", e)))
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.slippage()?;
        if self.trade.max_hops == 0 {
            return Err(AppError::ConfigError("trade.max_hops must be at least 1".to_string()));
        }
        if self.trade.ttl_seconds <= 0 {
            return Err(AppError::ConfigError("trade.ttl_seconds must be positive".to_string()));
        }
        if self.trade.gas_limit == 0 || self.trade.gas_limit > self.trade.gas_limit_ceiling {
            return Err(AppError::ConfigError(format!(
                "trade.gas_limit {} must be in (0, {}]",
                self.trade.gas_limit, self.trade.gas_limit_ceiling
            )));
        }
        if self.network.timeout_ms == 0 {
            return Err(AppError::ConfigError("network.timeout_ms must be positive".to_string()));
        }
        Ok(())
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from Config.toml in the working directory
    pub fn load_config() -> Result<SwapConfig, AppError> {
        Self::load("Config.toml")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<SwapConfig, AppError> {
        let config_content = fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::ConfigError(format!("Failed to read config file: {}", e)))?;
        SwapConfig::from_toml_str(&config_content)
    }
}
