use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use oauth_token_cache::utils::logging::LogLevel;
use oauth_token_cache::utils::{config_loader, logging};
use oauth_token_cache::{RedisStore, Token, TokenClient};
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// cached token, fetching a fresh one on a miss
    Token,
    /// cached token only; exits with an error on a miss
    Cached,
    /// always request a fresh token
    Fresh,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "oauth-token-cache.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    #[arg(short, long, value_enum, default_value = "token")]
    mode: Mode,
    /// print `<token_type> <access_token>` instead of the bare access token
    #[arg(long)]
    header: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config, set up logging
    // -------------------------------

    let args = Args::parse();
    let service_config = config_loader::run(&args.config).await?;
    logging::run(&service_config, args.log_level)?;

    // -------------------------------
    // 2. Connect cache store, build token client
    // -------------------------------

    let store = RedisStore::connect(&service_config.cache.url)
        .await
        .context("cannot connect to token cache")?;
    let client = TokenClient::new(service_config.client.clone(), Arc::new(store))?;
    info!(cache_key = %client.cache_key(), "token client ready");

    // -------------------------------
    // 3. Resolve token
    // -------------------------------

    let token: Token = match args.mode {
        Mode::Token => client.token().await?,
        Mode::Cached => client
            .cached_token()
            .await?
            .context("no cached token")?,
        Mode::Fresh => client.fresh_token().await?,
    };

    if args.header {
        println!("{}", token.authorization_header());
    } else {
        println!("{}", token.access_token());
    }
    Ok(())
}
