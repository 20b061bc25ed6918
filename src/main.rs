use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pairswap::application::{Cli, CommandExecutor};
use pairswap::shared::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = ConfigLoader::load(&cli.config).with_context(|| format!("loading {}", cli.config))?;
    if let Some(rpc_url) = cli.rpc_url {
        config.network.rpc_url = rpc_url;
    }

    CommandExecutor::execute(cli.command, config).await
}
