//! Formatting helpers used by the console views.
//!
//! - [`time`] - Date/time display, expiry check, date input parsing
//! - [`money`] - Amount and discount display

pub mod money;
pub mod time;
