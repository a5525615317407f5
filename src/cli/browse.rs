//! Interactive coupon list.
//!
//! Reads commands line by line from stdin:
//!
//! ```text
//! /SALE       set the search box to "SALE" (commits after the debounce period)
//! /           clear the search
//! <enter>     scroll to the end of the list (loads the next page)
//! :d CODE     delete a coupon
//! :r          reload the current search
//! :q          quit
//! ```

use anyhow::Result;
use chrono::{FixedOffset, Utc};
use colored::*;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use coupon_console::application::list_driver::{ListDriver, ListView, UiEvent, Update};
use coupon_console::application::services::list_controller::ListStatus;
use coupon_console::application::services::ListController;
use coupon_console::domain::repositories::CouponRepository;

use super::render;

pub async fn run<R: CouponRepository + ?Sized + 'static>(
    repository: Arc<R>,
    page_size: u32,
    debounce: Duration,
    offset: FixedOffset,
) -> Result<()> {
    println!("{}", "📋 Coupons".bright_blue().bold());
    println!(
        "  {}",
        "/text search · <enter> more · :d CODE delete · :r reload · :q quit".bright_black()
    );
    println!();

    let (tx, rx) = mpsc::channel(16);
    spawn_stdin_reader(tx.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(UiEvent::Quit).await;
        }
    });

    let mut driver = ListDriver::new(repository, page_size, debounce);
    let mut view = TerminalView::new(offset);
    driver.run(rx, &mut view).await;

    Ok(())
}

/// Parses one input line into a UI event; `None` for unknown commands.
fn parse_line(line: &str) -> Option<UiEvent> {
    let line = line.trim();

    if line.is_empty() {
        return Some(UiEvent::ScrollEnd);
    }
    if let Some(term) = line.strip_prefix('/') {
        return Some(UiEvent::Input(term.to_string()));
    }

    match line.split_once(char::is_whitespace) {
        Some((":d", code)) if !code.trim().is_empty() => {
            Some(UiEvent::Delete(code.trim().to_uppercase()))
        }
        None if line == ":r" => Some(UiEvent::Reload),
        None if line == ":q" => Some(UiEvent::Quit),
        _ => None,
    }
}

/// Blocking stdin lives on its own thread so it never holds up runtime shutdown.
fn spawn_stdin_reader(tx: mpsc::Sender<UiEvent>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };

            match parse_line(&line) {
                Some(event) => {
                    if tx.blocking_send(event).is_err() {
                        break;
                    }
                }
                None => eprintln!("{} {}", "Unknown command:".yellow(), line.trim()),
            }
        }
        let _ = tx.blocking_send(UiEvent::Quit);
    });
}

/// Prints rows as pages arrive and status lines for everything else.
struct TerminalView {
    offset: FixedOffset,
    printed: usize,
    last_status: ListStatus,
}

impl TerminalView {
    fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            printed: 0,
            last_status: ListStatus::Idle,
        }
    }

    fn print_new_rows(&mut self, list: &ListController) {
        let items = list.state().items();
        if self.printed == 0 && !items.is_empty() {
            render::print_table_header();
        }

        let now = Utc::now();
        for coupon in items.iter().skip(self.printed) {
            println!("{}", render::coupon_row(coupon, &self.offset, now));
        }
        self.printed = items.len();
    }

    fn print_footer(&self, list: &ListController) {
        let state = list.state();
        if state.items().is_empty() {
            println!("{}", "  No coupons found".yellow());
            return;
        }

        let more = if state.has_more() {
            " · <enter> for more".bright_black().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} of {}{}",
            state.items().len().to_string().bright_white().bold(),
            state.total_count().to_string().bright_white().bold(),
            more
        );
    }
}

impl ListView for TerminalView {
    fn render(&mut self, query_input: &str, list: &ListController, update: Option<&Update>) {
        match update {
            None => {
                let status = list.status();
                if status == ListStatus::LoadingMore && self.last_status != status {
                    println!("{}", "  Loading more…".bright_black());
                }
                if status == ListStatus::LoadingFirstPage && self.last_status != status {
                    println!("{}", "  Loading…".bright_black());
                }
                if !query_input.is_empty() && query_input != list.state().search_term() {
                    println!("  Search: {}", query_input.cyan());
                }
            }
            Some(Update::Committed { term }) => {
                self.printed = 0;
                println!();
                if term.is_empty() {
                    println!("{}", "🔍 All coupons".bright_blue());
                } else {
                    println!("{} {}", "🔍 Searching".bright_blue(), term.cyan());
                }
            }
            Some(Update::PageApplied { page, .. }) => {
                if *page == 1 {
                    self.printed = 0;
                }
                self.print_new_rows(list);
                self.print_footer(list);
            }
            Some(Update::PageFailed { message, .. }) => {
                println!("{} {}", "❌".red(), message.red());
                println!("  {}", ":r to retry".bright_black());
            }
            Some(Update::StaleDiscarded { .. }) => {}
            Some(Update::Deleted { code }) => {
                self.printed = self.printed.min(list.state().items().len());
                println!("{} {}", "✅ Deleted".green().bold(), code.cyan());
                self.print_footer(list);
            }
            Some(Update::DeleteFailed { code, message }) => {
                println!("{} {}: {}", "❌ Could not delete".red(), code.cyan(), message.red());
            }
        }

        self.last_status = list.status();
    }
}
