//! Colored terminal rendering of coupons and quotes.

use chrono::{DateTime, FixedOffset, Utc};
use colored::*;

use coupon_console::application::services::Quote;
use coupon_console::domain::entities::Coupon;
use coupon_console::utils::money::format_discount;
use coupon_console::utils::time::{format_date, format_date_time, is_expired};

const TITLE_WIDTH: usize = 28;

/// Column header matching [`coupon_row`].
///
/// ```text
///   Code             Title                        Discount     Usage           Expires     Status
///   ─────────────────────────────────────────────────────────────────────────────────────────────
/// ```
pub fn print_table_header() {
    println!(
        "  {:<16} {:<28} {:<12} {:<15} {:<11} {}",
        "Code".bright_white().bold(),
        "Title".bright_white().bold(),
        "Discount".bright_white().bold(),
        "Usage".bright_white().bold(),
        "Expires".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(95).bright_black());
}

pub fn coupon_row(coupon: &Coupon, offset: &FixedOffset, now: DateTime<Utc>) -> String {
    format!(
        "  {:<16} {:<28} {:<12} {:<15} {:<11} {}",
        coupon.code.cyan(),
        truncate(&coupon.title, TITLE_WIDTH),
        format_discount(coupon.kind, coupon.discount_value).bright_green(),
        coupon.usage_mode.label(),
        format_date(&coupon.expires_at, offset).bright_black(),
        status(coupon, now)
    )
}

pub fn print_coupon_detail(coupon: &Coupon, offset: &FixedOffset) {
    println!("{}", "🎟  Coupon".bright_blue().bold());
    println!();
    println!("  Code:        {}", coupon.code.cyan().bold());
    println!("  Title:       {}", coupon.title.bright_white());
    println!("  Description: {}", coupon.description);
    println!("  Type:        {}", coupon.kind);
    println!(
        "  Value:       {}",
        format_discount(coupon.kind, coupon.discount_value).bright_green()
    );
    println!("  Usage:       {}", coupon.usage_mode.label());
    println!(
        "  Expires:     {} {}",
        format_date_time(&coupon.expires_at, offset),
        status(coupon, Utc::now())
    );
    println!(
        "  Created:     {}",
        format_date_time(&coupon.created_at, offset).bright_black()
    );
    println!(
        "  Updated:     {}",
        format_date_time(&coupon.updated_at, offset).bright_black()
    );
    println!();
}

pub fn print_quote(quote: &Quote, offset: &FixedOffset) {
    println!("{}", "🧾 Mock Order".bright_blue().bold());
    println!();
    println!(
        "  Placed at: {}",
        format_date_time(&quote.created_at, offset).bright_black()
    );

    match (&quote.coupon, &quote.coupon_code) {
        (Some(coupon), _) => println!(
            "  Coupon:    {} ({})",
            coupon.code.cyan(),
            format_discount(coupon.kind, coupon.discount_value)
        ),
        (None, Some(code)) => println!("  Coupon:    {}", code.cyan()),
        (None, None) => println!("  Coupon:    {}", "none".bright_black()),
    }

    println!();
    println!("  Original:  {}", quote.original_display());
    println!("  Discount:  {}", quote.discount_display().bright_green());
    println!("  {}", "─".repeat(30).bright_black());
    println!("  Total:     {}", quote.final_display().bright_white().bold());
    println!();
}

fn status(coupon: &Coupon, now: DateTime<Utc>) -> ColoredString {
    if is_expired(&coupon.expires_at, &now) {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    }
}

/// Shortens `s` to at most `max` characters, marking the cut with `…`.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Summer sale", 28), "Summer sale");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("Giảm giá mùa hè", 5), "Giảm…");
    }
}
