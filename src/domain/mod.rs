//! Domain layer - core swap logic and entities

pub mod token;
pub mod pair;
pub mod trade;
pub mod slippage;
pub mod execution;
