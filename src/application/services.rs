//! Application services and use cases

use num_bigint::BigUint;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::domain::execution::{
    ExecutionSubmitter, PendingTransaction, SwapParametersBuilder, TransactionBroadcaster,
};
use crate::domain::pair::{Pair, ReserveReader};
use crate::domain::slippage::{ExpectedTrade, SlippageTolerance};
use crate::domain::token::TokenRegistry;
use crate::domain::trade::{best_trade_exact_in, best_trade_exact_out, BestTradeOptions, Trade};
use crate::shared::clock::Clock;
use crate::shared::config::SwapConfig;
use crate::shared::errors::SwapError;
use crate::shared::types::{Address, Token, TokenAmount};

/// Quotes and executes swaps against the direct pair of two tokens
pub struct SwapService {
    registry: Arc<TokenRegistry>,
    reader: Arc<dyn ReserveReader>,
    submitter: ExecutionSubmitter,
    builder: SwapParametersBuilder,
    clock: Arc<dyn Clock>,
    options: BestTradeOptions,
    rpc_timeout: Duration,
}

impl SwapService {
    pub fn new(
        config: &SwapConfig,
        registry: Arc<TokenRegistry>,
        reader: Arc<dyn ReserveReader>,
        broadcaster: Arc<dyn TransactionBroadcaster>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let rpc_timeout = Duration::from_millis(config.network.timeout_ms);
        let submitter = ExecutionSubmitter::new(
            config.network.chain_id,
            config.wallet.from,
            config.router.address,
            config.trade.gas_limit_ceiling,
            broadcaster,
            clock.clone(),
            rpc_timeout,
        );
        Self {
            registry,
            reader,
            submitter,
            builder: SwapParametersBuilder::new(config.trade.max_hops, config.router.wrapped_native),
            clock,
            options: BestTradeOptions {
                max_hops: config.trade.max_hops,
                ..BestTradeOptions::default()
            },
            rpc_timeout,
        }
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Best trade spending exactly `amount_in` raw units of `token_in`
    pub async fn quote_exact_in(
        &self,
        token_in: &Address,
        token_out: &Address,
        amount_in: BigUint,
        slippage: &SlippageTolerance,
    ) -> Result<ExpectedTrade, SwapError> {
        let (token_in, token_out) = self.resolve_tokens(token_in, token_out)?;
        let amount_in = TokenAmount::new(token_in.clone(), amount_in);
        if amount_in.is_zero() {
            return Err(SwapError::InvalidAmount("input amount must be positive".to_string()));
        }

        let pair = self.load_pair(&token_in, &token_out).await?;
        let trades = best_trade_exact_in(std::slice::from_ref(&pair), &amount_in, &token_out, self.options);
        let trade = trades
            .into_iter()
            .next()
            .ok_or_else(|| no_route(&token_in, &token_out))?;

        Ok(self.bound(trade, slippage))
    }

    /// Cheapest trade receiving exactly `amount_out` raw units of `token_out`
    pub async fn quote_exact_out(
        &self,
        token_in: &Address,
        token_out: &Address,
        amount_out: BigUint,
        slippage: &SlippageTolerance,
    ) -> Result<ExpectedTrade, SwapError> {
        let (token_in, token_out) = self.resolve_tokens(token_in, token_out)?;
        let amount_out = TokenAmount::new(token_out.clone(), amount_out);
        if amount_out.is_zero() {
            return Err(SwapError::InvalidAmount("output amount must be positive".to_string()));
        }

        let pair = self.load_pair(&token_in, &token_out).await?;
        let trades = best_trade_exact_out(std::slice::from_ref(&pair), &token_in, &amount_out, self.options);
        let trade = match trades.into_iter().next() {
            Some(trade) => trade,
            None => {
                // an output at or above the reserve is reported as such
                pair.input_amount(&amount_out)?;
                return Err(no_route(&token_in, &token_out));
            }
        };

        Ok(self.bound(trade, slippage))
    }

    /// Build router parameters for a quoted trade and submit them
    pub async fn execute(
        &self,
        quoted: &ExpectedTrade,
        recipient: Address,
        ttl_seconds: i64,
        gas_price_wei: u64,
        gas_limit: u64,
    ) -> Result<PendingTransaction, SwapError> {
        let params = self.builder.build(
            quoted.trade(),
            recipient,
            ttl_seconds,
            quoted.slippage(),
            self.clock.now(),
        )?;
        debug!("Router call {} with {} bytes of calldata", params.method, params.calldata.len());
        self.submitter.submit(&params, gas_price_wei, gas_limit).await
    }

    fn resolve_tokens(&self, token_in: &Address, token_out: &Address) -> Result<(Token, Token), SwapError> {
        let token_in = self.registry.lookup(token_in)?;
        let token_out = self.registry.lookup(token_out)?;
        if token_in == token_out {
            return Err(no_route(&token_in, &token_out));
        }
        Ok((token_in, token_out))
    }

    async fn load_pair(&self, token_in: &Token, token_out: &Token) -> Result<Pair, SwapError> {
        let snapshot = timeout(self.rpc_timeout, self.reader.fetch_pair(token_in, token_out))
            .await
            .map_err(|_| SwapError::Timeout(self.rpc_timeout.as_millis() as u64, "reserve read"))??;
        match snapshot {
            Some(snapshot) => Pair::from_snapshot(token_in, token_out, &snapshot),
            None => Err(no_route(token_in, token_out)),
        }
    }

    fn bound(&self, trade: Trade, slippage: &SlippageTolerance) -> ExpectedTrade {
        let quoted = ExpectedTrade::new(trade, slippage.clone());
        let trade = quoted.trade();
        info!(
            "Quote {} {} -> {} (bound {}, slippage {})",
            trade.trade_type(),
            trade.input_amount(),
            trade.output_amount(),
            quoted.bounded_counter_amount(),
            slippage
        );
        quoted
    }
}

fn no_route(token_in: &Token, token_out: &Token) -> SwapError {
    SwapError::NoRouteFound(token_in.symbol().to_string(), token_out.symbol().to_string())
}
