//! Reserve reads through the pair factory and pair contracts

use alloy::providers::DynProvider;
use async_trait::async_trait;
use tracing::debug;

use super::contracts::IUniswapV2Pair::getReservesReturn;
use super::contracts::{IUniswapV2Factory, IUniswapV2Pair};
use crate::domain::pair::{ReserveReader, ReserveSnapshot};
use crate::shared::errors::SwapError;
use crate::shared::types::{Address, Token};
use crate::shared::utils::from_uint;

pub struct RpcReserveReader {
    provider: DynProvider,
    factory: Address,
}

impl RpcReserveReader {
    pub fn new(provider: DynProvider, factory: Address) -> Self {
        Self { provider, factory }
    }

    async fn pair_address(&self, token_a: &Token, token_b: &Token) -> Result<Option<Address>, SwapError> {
        let factory = IUniswapV2Factory::new(self.factory, self.provider.clone());
        let pair = factory
            .getPair(token_a.address(), token_b.address())
            .call()
            .await
            .map_err(|e| SwapError::Rpc(format!("getPair on {}: {}", self.factory, e)))?;
        Ok(if pair.is_zero() { None } else { Some(pair) })
    }
}

#[async_trait]
impl ReserveReader for RpcReserveReader {
    async fn fetch_pair(&self, token_a: &Token, token_b: &Token) -> Result<Option<ReserveSnapshot>, SwapError> {
        let pair = match self.pair_address(token_a, token_b).await? {
            Some(pair) => pair,
            None => {
                debug!("Factory {} has no pair for {}/{}", self.factory, token_a.symbol(), token_b.symbol());
                return Ok(None);
            }
        };

        let contract = IUniswapV2Pair::new(pair, self.provider.clone());
        let (token0, token1, reserves) = futures::try_join!(
            async { contract.token0().call().await },
            async { contract.token1().call().await },
            async { contract.getReserves().call().await },
        )
        .map_err(|e| SwapError::Rpc(format!("pair {}: {}", pair, e)))?;

        let snapshot = snapshot_from(token0, token1, reserves);
        debug!(
            "Pair {} reserves {} / {}",
            pair, snapshot.reserve0, snapshot.reserve1
        );
        Ok(Some(snapshot))
    }
}

/// The block timestamp from `getReserves` is ignored
fn snapshot_from(token0: Address, token1: Address, reserves: getReservesReturn) -> ReserveSnapshot {
    ReserveSnapshot {
        token0,
        token1,
        reserve0: from_uint(reserves.reserve0),
        reserve1: from_uint(reserves.reserve1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::aliases::U112;
    use alloy::sol_types::SolCall;
    use num_bigint::BigUint;

    #[test]
    fn test_snapshot_from_get_reserves_output() {
        // (uint112, uint112, uint32) as returned by the pair contract
        let mut data = Vec::new();
        for word in [1_000_000u64, 2_000_000, 1_700_000_000] {
            let mut slot = [0u8; 32];
            slot[24..].copy_from_slice(&word.to_be_bytes());
            data.extend_from_slice(&slot);
        }
        let reserves = IUniswapV2Pair::getReservesCall::abi_decode_returns(&data).unwrap();
        assert_eq!(reserves.blockTimestampLast, 1_700_000_000);

        let snapshot = snapshot_from(Address::repeat_byte(1), Address::repeat_byte(2), reserves);
        assert_eq!(snapshot.token0, Address::repeat_byte(1));
        assert_eq!(snapshot.token1, Address::repeat_byte(2));
        assert_eq!(snapshot.reserve0, BigUint::from(1_000_000u32));
        assert_eq!(snapshot.reserve1, BigUint::from(2_000_000u32));
    }

    #[test]
    fn test_max_uint112_reserve() {
        let reserves = getReservesReturn {
            reserve0: U112::MAX,
            reserve1: U112::from(1u64),
            blockTimestampLast: 0,
        };
        let snapshot = snapshot_from(Address::repeat_byte(1), Address::repeat_byte(2), reserves);
        assert_eq!(snapshot.reserve0, (BigUint::from(1u8) << 112u32) - 1u8);
    }

    #[test]
    fn test_truncated_reserves_rejected() {
        assert!(IUniswapV2Pair::getReservesCall::abi_decode_returns(&[0u8; 32]).is_err());
    }
}
