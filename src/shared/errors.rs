//! Error handling for the application

use thiserror::Error;
use crate::shared::types::Address;

/// Failure reported by the signing/broadcast collaborator.
///
/// Carried through `SwapError::Broadcast` without reinterpretation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BroadcastError {
    #[error("Transaction rejected ({code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("Transport failure: {0}")]
    Transport(String),
}

/// Quote and execution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("Token not found: {0}")]
    TokenNotFound(String),

    #[error("Insufficient liquidity: {0}")]
    InsufficientLiquidity(String),

    #[error("Requested output exceeds the output reserve")]
    InsufficientOutputReserve,

    #[error("Input amount too small to produce any output")]
    InsufficientInputAmount,

    #[error("No route found for {0} -> {1}")]
    NoRouteFound(String, String),

    #[error("Invalid slippage tolerance: {0}")]
    InvalidSlippage(String),

    #[error("Unsupported trade shape: route of {hops} hops, router accepts at most {max_hops}")]
    UnsupportedTradeShape { hops: usize, max_hops: usize },

    #[error("Inconsistent token metadata for {0}")]
    InconsistentTokenMetadata(Address),

    #[error("Amounts of different tokens cannot be combined: {0} vs {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid deadline window: {0} seconds")]
    InvalidDeadline(i64),

    #[error("Deadline {deadline} is not after current time {now}")]
    DeadlineExpired { deadline: u64, now: i64 },

    #[error("Gas limit {gas_limit} outside (0, {ceiling}]")]
    GasLimitExceeded { gas_limit: u64, ceiling: u64 },

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Timed out after {0} ms: {1}")]
    Timeout(u64, &'static str),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error(transparent)]
    Broadcast(#[from] BroadcastError),
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Token list error: {0}")]
    TokenListError(String),

    #[error(transparent)]
    Swap(#[from] SwapError),
}
