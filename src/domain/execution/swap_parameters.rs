//! Router call construction for a quoted trade

use alloy::primitives::{Bytes, U256};
use alloy::sol_types::SolCall;
use serde::Serialize;
use std::fmt;

use super::router::IUniswapV2Router02::{
    swapETHForExactTokensCall, swapExactETHForTokensCall, swapExactTokensForETHCall,
    swapExactTokensForTokensCall, swapTokensForExactETHCall, swapTokensForExactTokensCall,
};
use crate::domain::slippage::{maximum_amount_in, minimum_amount_out, SlippageTolerance};
use crate::domain::trade::{Trade, TradeType};
use crate::shared::errors::SwapError;
use crate::shared::types::Address;
use crate::shared::utils::to_u256;

/// Router02 swap entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RouterMethod {
    SwapExactTokensForTokens,
    SwapTokensForExactTokens,
    SwapExactEthForTokens,
    SwapTokensForExactEth,
    SwapExactTokensForEth,
    SwapEthForExactTokens,
}

impl RouterMethod {
    pub fn name(&self) -> &'static str {
        match self {
            RouterMethod::SwapExactTokensForTokens => "swapExactTokensForTokens",
            RouterMethod::SwapTokensForExactTokens => "swapTokensForExactTokens",
            RouterMethod::SwapExactEthForTokens => "swapExactETHForTokens",
            RouterMethod::SwapTokensForExactEth => "swapTokensForExactETH",
            RouterMethod::SwapExactTokensForEth => "swapExactTokensForETH",
            RouterMethod::SwapEthForExactTokens => "swapETHForExactTokens",
        }
    }

    pub fn selector(&self) -> [u8; 4] {
        match self {
            RouterMethod::SwapExactTokensForTokens => swapExactTokensForTokensCall::SELECTOR,
            RouterMethod::SwapTokensForExactTokens => swapTokensForExactTokensCall::SELECTOR,
            RouterMethod::SwapExactEthForTokens => swapExactETHForTokensCall::SELECTOR,
            RouterMethod::SwapTokensForExactEth => swapTokensForExactETHCall::SELECTOR,
            RouterMethod::SwapExactTokensForEth => swapExactTokensForETHCall::SELECTOR,
            RouterMethod::SwapEthForExactTokens => swapETHForExactTokensCall::SELECTOR,
        }
    }
}

impl fmt::Display for RouterMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything needed to call the router, minus gas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParameters {
    pub method: RouterMethod,
    /// Selector followed by the ABI-encoded arguments
    pub calldata: Bytes,
    /// Native value to attach, in wei
    pub value: U256,
    /// Unix seconds after which the router reverts
    pub deadline: u64,
}

#[derive(Debug, Clone)]
pub struct SwapParametersBuilder {
    max_hops: usize,
    wrapped_native: Option<Address>,
}

impl SwapParametersBuilder {
    pub fn new(max_hops: usize, wrapped_native: Option<Address>) -> Self {
        Self {
            max_hops,
            wrapped_native,
        }
    }

    pub fn build(
        &self,
        trade: &Trade,
        recipient: Address,
        ttl_seconds: i64,
        slippage: &SlippageTolerance,
        now: i64,
    ) -> Result<SwapParameters, SwapError> {
        if ttl_seconds <= 0 {
            return Err(SwapError::InvalidDeadline(ttl_seconds));
        }
        let hops = trade.route().hops();
        if hops > self.max_hops {
            return Err(SwapError::UnsupportedTradeShape {
                hops,
                max_hops: self.max_hops,
            });
        }

        let deadline = now
            .checked_add(ttl_seconds)
            .ok_or(SwapError::ArithmeticOverflow("deadline"))?;
        let deadline = u64::try_from(deadline).map_err(|_| SwapError::InvalidDeadline(ttl_seconds))?;

        let native_in = self.is_native(trade.route().input().address());
        let native_out = self.is_native(trade.route().output().address());

        let amount_in = to_u256(maximum_amount_in(trade, slippage).raw(), "amount in")?;
        let amount_out = to_u256(minimum_amount_out(trade, slippage).raw(), "amount out")?;
        let path: Vec<Address> = trade.route().path().iter().map(|t| t.address()).collect();
        let to = recipient;
        let deadline_arg = U256::from(deadline);

        let (method, calldata, value) = match (trade.trade_type(), native_in, native_out) {
            (TradeType::ExactIn, true, _) => (
                RouterMethod::SwapExactEthForTokens,
                swapExactETHForTokensCall {
                    amountOutMin: amount_out,
                    path,
                    to,
                    deadline: deadline_arg,
                }
                .abi_encode(),
                amount_in,
            ),
            (TradeType::ExactIn, false, true) => (
                RouterMethod::SwapExactTokensForEth,
                swapExactTokensForETHCall {
                    amountIn: amount_in,
                    amountOutMin: amount_out,
                    path,
                    to,
                    deadline: deadline_arg,
                }
                .abi_encode(),
                U256::ZERO,
            ),
            (TradeType::ExactIn, false, false) => (
                RouterMethod::SwapExactTokensForTokens,
                swapExactTokensForTokensCall {
                    amountIn: amount_in,
                    amountOutMin: amount_out,
                    path,
                    to,
                    deadline: deadline_arg,
                }
                .abi_encode(),
                U256::ZERO,
            ),
            (TradeType::ExactOut, true, _) => (
                RouterMethod::SwapEthForExactTokens,
                swapETHForExactTokensCall {
                    amountOut: amount_out,
                    path,
                    to,
                    deadline: deadline_arg,
                }
                .abi_encode(),
                amount_in,
            ),
            (TradeType::ExactOut, false, true) => (
                RouterMethod::SwapTokensForExactEth,
                swapTokensForExactETHCall {
                    amountOut: amount_out,
                    amountInMax: amount_in,
                    path,
                    to,
                    deadline: deadline_arg,
                }
                .abi_encode(),
                U256::ZERO,
            ),
            (TradeType::ExactOut, false, false) => (
                RouterMethod::SwapTokensForExactTokens,
                swapTokensForExactTokensCall {
                    amountOut: amount_out,
                    amountInMax: amount_in,
                    path,
                    to,
                    deadline: deadline_arg,
                }
                .abi_encode(),
                U256::ZERO,
            ),
        };

        Ok(SwapParameters {
            method,
            calldata: calldata.into(),
            value,
            deadline,
        })
    }

    fn is_native(&self, address: Address) -> bool {
        self.wrapped_native == Some(address)
    }
}
