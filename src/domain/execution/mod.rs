//! Execution domain - router call construction and submission

pub mod router;
mod submitter;
mod swap_parameters;

pub use submitter::ExecutionSubmitter;
pub use swap_parameters::{RouterMethod, SwapParameters, SwapParametersBuilder};

use alloy::primitives::{Bytes, U256};
use async_trait::async_trait;
use serde::Serialize;

use crate::shared::errors::BroadcastError;
use crate::shared::types::{Address, ChainId};

/// Unsigned call handed to the broadcaster for signing and relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
    pub chain_id: ChainId,
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
    pub gas_price: u64,
    pub gas_limit: u64,
}

/// Handle to a broadcast transaction that has not been confirmed yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingTransaction {
    pub hash: String,
    pub method: RouterMethod,
    pub deadline: u64,
}

/// Signs and relays transactions
#[async_trait]
pub trait TransactionBroadcaster: Send + Sync {
    /// Returns the transaction hash
    async fn send(&self, envelope: &TransactionEnvelope) -> Result<String, BroadcastError>;
}
