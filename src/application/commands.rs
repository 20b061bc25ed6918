//! CLI commands and handlers
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use num_bigint::BigUint;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::SwapService;
use crate::domain::slippage::{ExpectedTrade, SlippageTolerance};
use crate::domain::token::TokenRegistry;
use crate::domain::trade::{to_display_price, TradeType};
use crate::infrastructure::blockchain::{connect, RpcBroadcaster, RpcReserveReader, TokenListLoader};
use crate::shared::clock::SystemClock;
use crate::shared::config::SwapConfig;
use crate::shared::types::{parse_address, Fraction};
use crate::shared::utils::parse_units;

#[derive(Parser)]
#[command(name = "pairswap")]
#[command(about = "Quote and execute swaps against a constant-product pair")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "Config.toml")]
    pub config: String,

    /// JSON-RPC endpoint (overrides network.rpc_url)
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tokens known for the configured chain
    Tokens,

    /// Quote a swap without sending anything
    Quote(TradeArgs),

    /// Quote a swap and submit it to the router
    Swap {
        #[command(flatten)]
        trade: TradeArgs,

        /// Recipient of the output tokens (defaults to wallet.from)
        #[arg(long)]
        recipient: Option<String>,

        /// Seconds until the router rejects the call (overrides trade.ttl_seconds)
        #[arg(long)]
        ttl: Option<i64>,

        /// Gas limit (overrides trade.gas_limit)
        #[arg(long)]
        gas_limit: Option<u64>,

        /// Gas price in wei (overrides trade.gas_price_wei)
        #[arg(long)]
        gas_price: Option<u64>,
    },
}

#[derive(Args, Clone)]
pub struct TradeArgs {
    /// Input token, by symbol or address
    pub from: String,

    /// Output token, by symbol or address
    pub to: String,

    /// Amount in whole tokens ("1.5"); the input amount unless --exact-out
    pub amount: String,

    /// Treat the amount as the exact output to receive
    #[arg(long)]
    pub exact_out: bool,

    /// Slippage tolerance such as "0.5%", "1/100" or "0.005"
    #[arg(short, long)]
    pub slippage: Option<String>,
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(command: Commands, config: SwapConfig) -> Result<()> {
        let registry = Arc::new(
            TokenListLoader::from_file(&config.tokens.list_path, config.network.chain_id)
                .with_context(|| format!("loading token list {}", config.tokens.list_path))?,
        );

        match command {
            Commands::Tokens => Self::execute_tokens_command(&registry),
            Commands::Quote(args) => {
                let service = Self::build_service(&config, registry)?;
                let quoted = Self::quote(&service, &config, &args).await?;
                Self::print_quote(&quoted)
            }
            Commands::Swap {
                trade,
                recipient,
                ttl,
                gas_limit,
                gas_price,
            } => {
                let service = Self::build_service(&config, registry)?;
                let quoted = Self::quote(&service, &config, &trade).await?;
                Self::print_quote(&quoted)?;

                let recipient = match recipient {
                    Some(r) => parse_address(&r)?,
                    None => config.wallet.from,
                };
                let pending = service
                    .execute(
                        &quoted,
                        recipient,
                        ttl.unwrap_or(config.trade.ttl_seconds),
                        gas_price.unwrap_or(config.trade.gas_price_wei),
                        gas_limit.unwrap_or(config.trade.gas_limit),
                    )
                    .await?;
                println!("Submitted {} tx {} (deadline {})", pending.method, pending.hash, pending.deadline);
                Ok(())
            }
        }
    }

    fn build_service(config: &SwapConfig, registry: Arc<TokenRegistry>) -> Result<SwapService> {
        let provider = connect(
            &config.network.rpc_url,
            Duration::from_millis(config.network.timeout_ms),
        )?;
        Ok(SwapService::new(
            config,
            registry,
            Arc::new(RpcReserveReader::new(provider.clone(), config.router.factory_address)),
            Arc::new(RpcBroadcaster::new(provider)),
            Arc::new(SystemClock),
        ))
    }

    fn execute_tokens_command(registry: &TokenRegistry) -> Result<()> {
        let mut tokens: Vec<_> = registry.iter().collect();
        tokens.sort_by(|a, b| a.symbol().cmp(b.symbol()));
        for token in tokens {
            println!("{:<8} {:>2}  {}  {}", token.symbol(), token.decimals(), token.address(), token.name());
        }
        Ok(())
    }

    async fn quote(service: &SwapService, config: &SwapConfig, args: &TradeArgs) -> Result<ExpectedTrade> {
        let slippage: SlippageTolerance = match &args.slippage {
            Some(s) => s.parse()?,
            None => config.slippage()?,
        };
        let token_in = service.registry().resolve(&args.from)?;
        let token_out = service.registry().resolve(&args.to)?;

        let quoted = if args.exact_out {
            let raw: BigUint = parse_units(&args.amount, token_out.decimals())?;
            service
                .quote_exact_out(&token_in.address(), &token_out.address(), raw, &slippage)
                .await?
        } else {
            let raw: BigUint = parse_units(&args.amount, token_in.decimals())?;
            service
                .quote_exact_in(&token_in.address(), &token_out.address(), raw, &slippage)
                .await?
        };
        Ok(quoted)
    }

    fn print_quote(quoted: &ExpectedTrade) -> Result<()> {
        let trade = quoted.trade();
        let input = trade.input_amount();
        let output = trade.output_amount();
        let price = to_display_price(&trade.execution_price()?, input.token(), output.token())?;
        let impact = trade.price_impact()?;
        let impact_pct = Fraction::new(impact.numerator() * 100u32, impact.denominator().clone())?;

        let path: Vec<&str> = trade.route().path().iter().map(|t| t.symbol()).collect();
        println!("Trade:        {} ({})", trade.trade_type(), path.join(" -> "));
        println!("Input:        {}", input);
        println!("Output:       {}", output);
        match trade.trade_type() {
            TradeType::ExactIn => println!("Minimum out:  {}", quoted.bounded_counter_amount()),
            TradeType::ExactOut => println!("Maximum in:   {}", quoted.bounded_counter_amount()),
        }
        println!(
            "Price:        {} {} per {}",
            price.to_fixed(6),
            output.token().symbol(),
            input.token().symbol()
        );
        println!("Price impact: {}%", impact_pct.to_fixed(2));
        println!("Slippage:     {}", quoted.slippage());
        Ok(())
    }
}
