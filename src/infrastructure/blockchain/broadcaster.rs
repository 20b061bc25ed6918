//! Broadcast via `eth_sendTransaction`; the node holds the signing key

use alloy::network::TransactionBuilder;
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tracing::debug;

use super::provider::broadcast_error;
use crate::domain::execution::{TransactionBroadcaster, TransactionEnvelope};
use crate::shared::errors::BroadcastError;

pub struct RpcBroadcaster {
    provider: DynProvider,
}

impl RpcBroadcaster {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

fn transaction_request(envelope: &TransactionEnvelope) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(envelope.from)
        .with_to(envelope.to)
        .with_input(envelope.data.clone())
        .with_value(envelope.value)
        .with_gas_limit(envelope.gas_limit)
        .with_gas_price(envelope.gas_price as u128)
        .with_chain_id(envelope.chain_id)
}

#[async_trait]
impl TransactionBroadcaster for RpcBroadcaster {
    async fn send(&self, envelope: &TransactionEnvelope) -> Result<String, BroadcastError> {
        let request = transaction_request(envelope);
        debug!("eth_sendTransaction {:?}", request);
        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(broadcast_error)?;
        Ok(pending.tx_hash().to_string())
    }
}
