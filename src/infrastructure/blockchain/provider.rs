//! HTTP provider for an Ethereum-compatible node

use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::client::RpcClient;
use alloy::transports::http::Http;
use alloy::transports::{RpcError, TransportError};
use std::time::Duration;
use tracing::info;

use crate::shared::errors::{AppError, BroadcastError};

/// Provider without fillers; the node assigns the nonce and signs
pub fn connect(rpc_url: &str, request_timeout: Duration) -> Result<DynProvider, AppError> {
    let url: reqwest::Url = rpc_url
        .parse()
        .map_err(|e| AppError::ConfigError(format!("Invalid network.rpc_url {}: {}", rpc_url, e)))?;
    let http_client = reqwest::Client::builder()
        .timeout(request_timeout)
        .build()
        .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

    info!("Using RPC endpoint {}", url);
    let client = RpcClient::new(Http::with_client(http_client, url), false);
    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_client(client)
        .erased())
}

/// Node-side refusals keep their JSON-RPC code; everything else is transport
pub fn broadcast_error(e: TransportError) -> BroadcastError {
    match e {
        RpcError::ErrorResp(payload) => BroadcastError::Rejected {
            code: payload.code,
            message: payload.message.to_string(),
        },
        other => BroadcastError::Transport(other.to_string()),
    }
}
