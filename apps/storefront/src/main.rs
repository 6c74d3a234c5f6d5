//! Fast Food Storefront - terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Against a backend on localhost:5000 with the default config file
//! storefront
//!
//! # Explicit config file and backend
//! storefront --config ./storefront.toml --api-url http://127.0.0.1:8080
//!
//! # Keep the login token in memory only
//! storefront --no-persist
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

use fastfood_client::StorefrontConfig;
use fastfood_storefront::{init_tracing, repl, Backends, Storefront};

#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about = "Fast food storefront in the terminal")]
struct Cli {
    /// Path to the configuration file (defaults to the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides config and FASTFOOD_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Keep the login token in memory instead of the token file
    #[arg(long)]
    no_persist: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    info!("Starting Fast Food Storefront");

    let mut config = StorefrontConfig::load(cli.config).context("failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
        config.validate().context("invalid --api-url")?;
    }

    let backends =
        Backends::from_config(&config, !cli.no_persist).context("failed to set up backends")?;
    let storefront = Storefront::start(config, backends);

    repl::run(&storefront, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("terminal I/O failed")?;

    info!("Storefront closed");
    Ok(())
}
