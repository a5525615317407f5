//! # Coupon Console
//!
//! A terminal administration console for a coupon management REST service:
//! browse and search coupons, create, edit and delete them, and preview how a
//! coupon prices an order.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Coupon entities and repository traits
//! - **Application Layer** ([`application`]) - List paging, search debouncing and services
//! - **Infrastructure Layer** ([`infrastructure`]) - REST client for the coupon API
//! - **API Layer** ([`api`]) - Request/response DTOs and envelope decoding
//! - **Utilities** ([`utils`]) - Date and amount formatting
//!
//! ## Features
//!
//! - Infinite-scroll coupon list with debounced search
//! - Out-of-order responses from superseded searches are discarded
//! - Local form validation before anything is sent
//! - Mock order pricing
//!
//! ## Quick Start
//!
//! ```bash
//! export COUPON_API_URL="http://localhost:8080"
//!
//! coupon-console ping
//! coupon-console browse
//! coupon-console quote --cost 100000 --coupon SALE10
//! ```
//!
//! ## Configuration
//!
//! Console configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub mod config;

pub use error::{ApiError, SubmitError};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for the binary
/// and integration tests.
pub mod prelude {
    pub use crate::api::dto::{CouponRequest, ListQuery, MockOrderRequest};
    pub use crate::application::list_driver::{ListDriver, ListView, UiEvent, Update};
    pub use crate::application::services::{
        CouponService, ListController, ListStatus, OrderService, Quote,
    };
    pub use crate::domain::entities::{Coupon, CouponType, MockOrder, Page, UsageMode};
    pub use crate::domain::repositories::{CouponRepository, OrderRepository};
    pub use crate::error::{ApiError, SubmitError};
    pub use crate::infrastructure::http::{ApiClient, HttpCouponRepository, HttpOrderRepository};
}
