//! Application layer: console logic on top of the repository traits.
//!
//! # Available Components
//!
//! - [`services::ListController`] - Paging, search sessions and stale-result handling
//! - [`list_driver::ListDriver`] - Event loop running a list against the network
//! - [`debounce::Debouncer`] - Cancel-on-reschedule timer for search input
//! - [`services::CouponService`] - Coupon lookup, form submission and deletion
//! - [`services::OrderService`] - Mock order pricing

pub mod debounce;
pub mod list_driver;
pub mod services;
