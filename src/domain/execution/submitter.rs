//! Gas attachment and dispatch of router calls

use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use super::{PendingTransaction, SwapParameters, TransactionBroadcaster, TransactionEnvelope};
use crate::shared::clock::Clock;
use crate::shared::errors::SwapError;
use crate::shared::types::{Address, ChainId};

pub struct ExecutionSubmitter {
    chain_id: ChainId,
    from: Address,
    router: Address,
    gas_limit_ceiling: u64,
    broadcaster: Arc<dyn TransactionBroadcaster>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl ExecutionSubmitter {
    pub fn new(
        chain_id: ChainId,
        from: Address,
        router: Address,
        gas_limit_ceiling: u64,
        broadcaster: Arc<dyn TransactionBroadcaster>,
        clock: Arc<dyn Clock>,
        timeout: Duration,
    ) -> Self {
        Self {
            chain_id,
            from,
            router,
            gas_limit_ceiling,
            broadcaster,
            clock,
            timeout,
        }
    }

    /// Submit once; no retries
    pub async fn submit(
        &self,
        params: &SwapParameters,
        gas_price_wei: u64,
        gas_limit: u64,
    ) -> Result<PendingTransaction, SwapError> {
        let now = self.clock.now();
        if i64::try_from(params.deadline).map_or(false, |deadline| deadline <= now) {
            return Err(SwapError::DeadlineExpired {
                deadline: params.deadline,
                now,
            });
        }
        if gas_limit == 0 || gas_limit > self.gas_limit_ceiling {
            return Err(SwapError::GasLimitExceeded {
                gas_limit,
                ceiling: self.gas_limit_ceiling,
            });
        }

        let envelope = TransactionEnvelope {
            chain_id: self.chain_id,
            from: self.from,
            to: self.router,
            data: params.calldata.clone(),
            value: params.value,
            gas_price: gas_price_wei,
            gas_limit,
        };

        info!(
            "Submitting {} to router {} (value {}, gas {} @ {} wei, deadline {})",
            params.method, self.router, envelope.value, gas_limit, gas_price_wei, params.deadline
        );

        let hash = match timeout(self.timeout, self.broadcaster.send(&envelope)).await {
            Ok(Ok(hash)) => hash,
            Ok(Err(e)) => {
                warn!("Broadcast failed: {}", e);
                return Err(e.into());
            }
            Err(_) => {
                warn!("Broadcast timed out after {:?}", self.timeout);
                return Err(SwapError::Timeout(self.timeout.as_millis() as u64, "broadcast"));
            }
        };

        info!("Transaction sent: {}", hash);
        Ok(PendingTransaction {
            hash,
            method: params.method,
            deadline: params.deadline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::execution::RouterMethod;
    use crate::shared::clock::FixedClock;
    use crate::shared::errors::BroadcastError;
    use alloy::primitives::{Bytes, U256};
    use async_trait::async_trait;
    use std::sync::Mutex;

    const NOW: i64 = 1_700_000_000;

    #[derive(Default)]
    struct RecordingBroadcaster {
        sent: Mutex<Vec<TransactionEnvelope>>,
        reject: Option<BroadcastError>,
    }

    #[async_trait]
    impl TransactionBroadcaster for RecordingBroadcaster {
        async fn send(&self, envelope: &TransactionEnvelope) -> Result<String, BroadcastError> {
            self.sent.lock().unwrap().push(envelope.clone());
            match &self.reject {
                Some(e) => Err(e.clone()),
                None => Ok("0xabc".to_string()),
            }
        }
    }

    struct StalledBroadcaster;

    #[async_trait]
    impl TransactionBroadcaster for StalledBroadcaster {
        async fn send(&self, _envelope: &TransactionEnvelope) -> Result<String, BroadcastError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("0xlate".to_string())
        }
    }

    fn params(deadline: u64) -> SwapParameters {
        SwapParameters {
            method: RouterMethod::SwapExactEthForTokens,
            calldata: Bytes::from(RouterMethod::SwapExactEthForTokens.selector().to_vec()),
            value: U256::from(5u64),
            deadline,
        }
    }

    fn submitter(broadcaster: Arc<dyn TransactionBroadcaster>) -> ExecutionSubmitter {
        ExecutionSubmitter::new(
            1,
            Address::repeat_byte(0xaa),
            Address::repeat_byte(0xbb),
            500_000,
            broadcaster,
            Arc::new(FixedClock(NOW)),
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn test_submit_builds_envelope() {
        let broadcaster = Arc::new(RecordingBroadcaster::default());
        let pending = submitter(broadcaster.clone())
            .submit(&params((NOW + 1800) as u64), 30, 250_000)
            .await
            .unwrap();
        assert_eq!(pending.hash, "0xabc");
        assert_eq!(pending.method, RouterMethod::SwapExactEthForTokens);

        let sent = broadcaster.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, Address::repeat_byte(0xbb));
        assert_eq!(sent[0].from, Address::repeat_byte(0xaa));
        assert_eq!(sent[0].value, U256::from(5u64));
        assert_eq!(sent[0].gas_limit, 250_000);
        assert_eq!(&sent[0].data[..4], &RouterMethod::SwapExactEthForTokens.selector());
    }

    #[tokio::test]
    async fn test_expired_deadline() {
        let broadcaster = Arc::new(RecordingBroadcaster::default());
        let result = submitter(broadcaster.clone()).submit(&params(NOW as u64), 30, 250_000).await;
        assert_eq!(
            result,
            Err(SwapError::DeadlineExpired {
                deadline: NOW as u64,
                now: NOW
            })
        );
        assert!(broadcaster.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_gas_limit_bounds() {
        let s = submitter(Arc::new(RecordingBroadcaster::default()));
        let p = params((NOW + 60) as u64);
        assert!(matches!(s.submit(&p, 30, 0).await, Err(SwapError::GasLimitExceeded { .. })));
        assert!(matches!(
            s.submit(&p, 30, 500_001).await,
            Err(SwapError::GasLimitExceeded { gas_limit: 500_001, ceiling: 500_000 })
        ));
        assert!(s.submit(&p, 30, 500_000).await.is_ok());
    }

    #[tokio::test]
    async fn test_rejection_surfaces_verbatim() {
        let rejection = BroadcastError::Rejected {
            code: -32000,
            message: "insufficient funds for gas * price + value".to_string(),
        };
        let broadcaster = Arc::new(RecordingBroadcaster {
            sent: Mutex::new(Vec::new()),
            reject: Some(rejection.clone()),
        });
        let result = submitter(broadcaster).submit(&params((NOW + 60) as u64), 30, 21_000).await;
        assert_eq!(result, Err(SwapError::Broadcast(rejection)));
    }

    #[tokio::test]
    async fn test_broadcast_timeout() {
        let result = submitter(Arc::new(StalledBroadcaster))
            .submit(&params((NOW + 60) as u64), 30, 21_000)
            .await;
        assert_eq!(result, Err(SwapError::Timeout(50, "broadcast")));
    }
}
