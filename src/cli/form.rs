//! Interactive create and edit forms.
//!
//! Prompts are pre-filled with the current form values, so after a rejected
//! submit the user edits what they typed instead of starting over.

use anyhow::Result;
use chrono::FixedOffset;
use colored::*;
use dialoguer::{Confirm, Input, Select};

use coupon_console::api::dto::CouponRequest;
use coupon_console::application::services::CouponService;
use coupon_console::config::Config;
use coupon_console::domain::entities::{CouponType, UsageMode};
use coupon_console::domain::repositories::CouponRepository;
use coupon_console::utils::money::format_discount;
use coupon_console::utils::time::{DATE_TIME_FORMAT, format_date_time, parse_date_time_input};

use super::render;

const KINDS: [CouponType; 2] = [CouponType::Percentage, CouponType::Fixed];
const USAGE_MODES: [UsageMode; 2] = [UsageMode::Manual, UsageMode::Auto];

/// Creates a coupon with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for every field
/// 2. Show a summary and confirm (unless `--yes`)
/// 3. Validate and submit
/// 4. On failure show the reason and offer to edit the same input again
pub async fn create<R: CouponRepository + ?Sized>(
    service: &CouponService<R>,
    config: &Config,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🎟  Create Coupon".bright_blue().bold());
    println!();

    let mut form = CouponRequest::default();

    loop {
        prompt_fields(&mut form, &config.display_offset, true)?;
        print_summary(&form, &config.display_offset);

        if !skip_confirm {
            let confirmed = Confirm::new()
                .with_prompt("Create this coupon?")
                .default(true)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }
        }

        match service.create(&form).await {
            Ok(coupon) => {
                println!("{}", "✅ Coupon created successfully!".green().bold());
                println!();
                render::print_coupon_detail(&coupon, &config.display_offset);
                return Ok(());
            }
            Err(e) => {
                if !offer_retry(&e.user_message())? {
                    anyhow::bail!("{}", e.user_message());
                }
            }
        }
    }
}

/// Edits an existing coupon. The code itself cannot be changed.
pub async fn edit<R: CouponRepository + ?Sized>(
    service: &CouponService<R>,
    config: &Config,
    code: &str,
) -> Result<()> {
    let coupon = service
        .get(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message("Failed to fetch coupon")))?;

    println!("{} {}", "✏️  Edit Coupon".bright_blue().bold(), coupon.code.cyan());
    println!();

    let mut form = CouponRequest::from(&coupon);

    loop {
        prompt_fields(&mut form, &config.display_offset, false)?;
        print_summary(&form, &config.display_offset);

        let confirmed = Confirm::new()
            .with_prompt("Save changes?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }

        match service.update(&coupon.code, &form).await {
            Ok(updated) => {
                println!("{}", "✅ Coupon updated successfully!".green().bold());
                println!();
                render::print_coupon_detail(&updated, &config.display_offset);
                return Ok(());
            }
            Err(e) => {
                if !offer_retry(&e.user_message())? {
                    anyhow::bail!("{}", e.user_message());
                }
            }
        }
    }
}

fn offer_retry(message: &str) -> Result<bool> {
    println!();
    println!("{} {}", "❌".red(), message.red());
    println!();

    Ok(Confirm::new()
        .with_prompt("Edit and try again?")
        .default(true)
        .interact()?)
}

fn prompt_fields(form: &mut CouponRequest, offset: &FixedOffset, with_code: bool) -> Result<()> {
    if with_code {
        let code: String = Input::new()
            .with_prompt("Coupon code")
            .with_initial_text(form.code.clone())
            .interact_text()?;
        form.set_code(&code);
    }

    form.title = Input::new()
        .with_prompt("Title")
        .with_initial_text(form.title.clone())
        .interact_text()?;

    form.description = Input::new()
        .with_prompt("Description")
        .with_initial_text(form.description.clone())
        .interact_text()?;

    let kind_labels: Vec<&str> = KINDS.iter().map(|k| k.label()).collect();
    let kind = Select::new()
        .with_prompt("Type")
        .items(&kind_labels[..])
        .default(KINDS.iter().position(|k| *k == form.kind).unwrap_or(0))
        .interact()?;
    form.kind = KINDS[kind];

    let usage_labels: Vec<&str> = USAGE_MODES.iter().map(|u| u.label()).collect();
    let usage = Select::new()
        .with_prompt("Usage")
        .items(&usage_labels[..])
        .default(
            USAGE_MODES
                .iter()
                .position(|u| *u == form.usage_mode)
                .unwrap_or(0),
        )
        .interact()?;
    form.usage_mode = USAGE_MODES[usage];

    let value_prompt = match form.kind {
        CouponType::Percentage => "Value (%)",
        CouponType::Fixed => "Value (VND)",
    };
    let initial_value = if form.discount_value > 0.0 {
        form.discount_value.to_string()
    } else {
        String::new()
    };
    let value: String = Input::new()
        .with_prompt(value_prompt)
        .with_initial_text(initial_value)
        .validate_with(|input: &String| -> Result<(), String> {
            input
                .trim()
                .parse::<f64>()
                .map(|_| ())
                .map_err(|_| "Enter a number".to_string())
        })
        .interact_text()?;
    form.discount_value = value.trim().parse().unwrap_or_default();

    let initial_expiry = form
        .expires_at
        .map(|at| at.with_timezone(offset).format(DATE_TIME_FORMAT).to_string())
        .unwrap_or_default();
    let expiry: String = Input::new()
        .with_prompt("Expires at (DD/MM/YYYY [HH:MM[:SS]])")
        .with_initial_text(initial_expiry)
        .validate_with(|input: &String| -> Result<(), String> {
            parse_date_time_input(input, offset)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    form.expires_at = parse_date_time_input(&expiry, offset).ok();

    Ok(())
}

fn print_summary(form: &CouponRequest, offset: &FixedOffset) {
    println!();
    println!("{}", "Coupon details:".bright_white().bold());
    println!("  Code:    {}", form.code.cyan());
    println!("  Title:   {}", form.title);
    println!("  Type:    {} / {}", form.kind, form.usage_mode.label());
    println!(
        "  Value:   {}",
        format_discount(form.kind, form.discount_value).bright_green()
    );
    if let Some(at) = &form.expires_at {
        println!("  Expires: {}", format_date_time(at, offset));
    }
    println!();
}
