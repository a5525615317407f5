//! Terminal console for the coupon management service.
//!
//! # Usage
//!
//! ```bash
//! # Check that the API is reachable
//! coupon-console ping
//!
//! # First page of coupons, or every page matching a code
//! coupon-console list
//! coupon-console list --search SALE --all
//!
//! # Interactive list with infinite scroll and live search
//! coupon-console browse
//!
//! # Manage a coupon
//! coupon-console show SALE10
//! coupon-console create
//! coupon-console edit SALE10
//! coupon-console delete SALE10
//!
//! # Price a mock order
//! coupon-console quote --cost 100000 --coupon SALE10
//! ```
//!
//! # Environment Variables
//!
//! See [`coupon_console::config`]. A `.env` file in the working directory is
//! loaded first.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use coupon_console::config::{self, Config};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Console};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    init_tracing(&config);
    config.print_summary();

    let console = Console::new(config).context("Failed to set up the API client")?;
    console.run(cli.command).await
}

/// Logs go to stderr so command output stays clean.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
