//! Command-line front end.
//!
//! Every subcommand goes through the same services and repositories as the
//! interactive list; this module only parses arguments, prompts and prints.

mod browse;
mod form;
mod render;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

use coupon_console::application::services::list_controller::ListStatus;
use coupon_console::application::services::{CouponService, ListController, OrderService};
use coupon_console::config::Config;
use coupon_console::domain::repositories::CouponRepository;
use coupon_console::infrastructure::http::{ApiClient, HttpCouponRepository, HttpOrderRepository};
use coupon_console::utils::time::parse_date_time_input;

/// Terminal console for managing discount coupons.
#[derive(Parser)]
#[command(name = "coupon-console")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Check that the coupon API is reachable
    Ping,

    /// Print coupons, one page by default
    List {
        /// Only coupons whose code matches
        #[arg(short, long)]
        search: Option<String>,

        /// Keep fetching until every matching coupon is shown
        #[arg(short, long)]
        all: bool,
    },

    /// Interactive list with live search and infinite scroll
    Browse,

    /// Show one coupon
    Show {
        /// Coupon code
        code: String,
    },

    /// Create a coupon
    Create {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Edit an existing coupon
    Edit {
        /// Coupon code
        code: String,
    },

    /// Delete a coupon
    Delete {
        /// Coupon code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Price a mock order, optionally with a coupon
    Quote {
        /// Order cost in VND
        #[arg(short, long)]
        cost: f64,

        /// Coupon code to apply
        #[arg(short = 'p', long)]
        coupon: Option<String>,

        /// Order time, e.g. "19/10/2026 10:30" (default: now)
        #[arg(short, long)]
        at: Option<String>,
    },
}

/// Shared state of one console invocation.
pub struct Console {
    config: Config,
    client: ApiClient,
    coupons: Arc<HttpCouponRepository>,
    orders: Arc<HttpOrderRepository>,
}

impl Console {
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::new(&config.api_url, &config.api_version, config.http_timeout())?;

        Ok(Self {
            coupons: Arc::new(HttpCouponRepository::new(client.clone())),
            orders: Arc::new(HttpOrderRepository::new(client.clone())),
            client,
            config,
        })
    }

    /// Dispatches one command.
    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Ping => self.ping().await,
            Commands::List { search, all } => self.list(search.as_deref(), all).await,
            Commands::Browse => {
                browse::run(
                    Arc::clone(&self.coupons),
                    self.config.page_size,
                    self.config.search_debounce(),
                    self.config.display_offset,
                )
                .await
            }
            Commands::Show { code } => self.show(&code).await,
            Commands::Create { yes } => form::create(&self.coupon_service(), &self.config, yes).await,
            Commands::Edit { code } => form::edit(&self.coupon_service(), &self.config, &code).await,
            Commands::Delete { code, yes } => self.delete(&code, yes).await,
            Commands::Quote { cost, coupon, at } => {
                self.quote(cost, coupon.as_deref(), at.as_deref()).await
            }
        }
    }

    fn coupon_service(&self) -> CouponService<HttpCouponRepository> {
        CouponService::new(Arc::clone(&self.coupons))
    }

    async fn ping(&self) -> Result<()> {
        println!(
            "{} {}",
            "🔍 Pinging".bright_blue(),
            self.client.root().as_str().bright_white()
        );

        let reply = self
            .client
            .ping()
            .await
            .map_err(|e| anyhow::anyhow!("API unreachable: {}", e))?;

        println!("{} {}", "✅ API answered".green().bold(), reply.bright_white());
        Ok(())
    }

    /// Prints the first page, or all pages with `all`.
    ///
    /// Pages are fetched one after another through the list controller, so
    /// the output follows the same paging and de-duplication rules as `browse`.
    async fn list(&self, search: Option<&str>, all: bool) -> Result<()> {
        let mut controller = ListController::new(self.config.page_size);
        let mut request = match search {
            Some(term) => controller.commit_search(term),
            None => controller.mount(),
        };

        while let Some(req) = request {
            let result = self.coupons.list(&req.query).await;
            controller.apply_page(&req, result);

            if controller.status() == ListStatus::Error {
                anyhow::bail!(
                    "{}",
                    controller.error().unwrap_or("Failed to fetch coupons")
                );
            }

            request = if all { controller.sentinel_visible() } else { None };
        }

        let state = controller.state();
        println!("{}", "📋 Coupons".bright_blue().bold());
        if !state.search_term().is_empty() {
            println!("  Search: {}", state.search_term().cyan());
        }
        println!();

        if state.items().is_empty() {
            println!("{}", "  No coupons found".yellow());
            return Ok(());
        }

        let now = Utc::now();
        render::print_table_header();
        for coupon in state.items() {
            println!("{}", render::coupon_row(coupon, &self.config.display_offset, now));
        }

        println!();
        println!(
            "  Showing {} of {}",
            state.items().len().to_string().bright_white().bold(),
            state.total_count().to_string().bright_white().bold()
        );
        if state.has_more() {
            println!(
                "  More available: {} or {}",
                "--all".bright_cyan(),
                "coupon-console browse".bright_cyan()
            );
        }
        println!();

        Ok(())
    }

    async fn show(&self, code: &str) -> Result<()> {
        let coupon = self
            .coupon_service()
            .get(code)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e.user_message("Failed to fetch coupon")))?;

        render::print_coupon_detail(&coupon, &self.config.display_offset);
        Ok(())
    }

    async fn delete(&self, code: &str, skip_confirm: bool) -> Result<()> {
        println!("{}", "🗑  Delete Coupon".bright_blue().bold());
        println!();
        println!("  Coupon: {}", code.trim().cyan());
        println!();

        if !skip_confirm {
            let confirmed = Confirm::new()
                .with_prompt("Delete this coupon?")
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }
        }

        self.coupon_service()
            .delete(code)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e.user_message("Failed to delete coupon")))?;

        println!("{}", "✅ Coupon deleted".green().bold());
        println!();
        Ok(())
    }

    async fn quote(&self, cost: f64, coupon: Option<&str>, at: Option<&str>) -> Result<()> {
        if !cost.is_finite() || cost < 0.0 {
            anyhow::bail!("Cost must be a non-negative amount, got {cost}");
        }

        let created_at = match at {
            Some(raw) => parse_date_time_input(raw, &self.config.display_offset)
                .context("Invalid order time")?,
            None => Utc::now(),
        };

        let quote = OrderService::new(Arc::clone(&self.orders))
            .quote(cost, coupon, created_at)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e.user_message("Failed to price order")))?;

        render::print_quote(&quote, &self.config.display_offset);
        Ok(())
    }
}
