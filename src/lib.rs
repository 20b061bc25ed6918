//! Pairswap - constant-product AMM swap quoting and execution
//! Built with Domain-Driven Design principles

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;

// Re-export main types for convenience
pub use application::SwapService;
pub use domain::slippage::{ExpectedTrade, SlippageTolerance};
pub use domain::token::TokenRegistry;
pub use domain::trade::{Trade, TradeType};
pub use shared::errors::{AppError, BroadcastError, SwapError};
