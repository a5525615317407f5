//! REST client for the remote coupon service.
//!
//! - [`ApiClient`] - reqwest wrapper: URL building, timeouts, envelope decoding
//! - [`HttpCouponRepository`] - [`crate::domain::repositories::CouponRepository`] over HTTP
//! - [`HttpOrderRepository`] - [`crate::domain::repositories::OrderRepository`] over HTTP

pub mod client;
pub mod coupon_repository;
pub mod order_repository;

pub use client::ApiClient;
pub use coupon_repository::HttpCouponRepository;
pub use order_repository::HttpOrderRepository;
