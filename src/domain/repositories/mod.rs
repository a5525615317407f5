//! Repository trait definitions for the domain layer.
//!
//! The coupon data lives behind a remote REST service; these traits are the
//! seam between the console logic and that service.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::http`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`CouponRepository`] - Coupon CRUD and paginated listing
//! - [`OrderRepository`] - Mock order pricing

pub mod coupon_repository;
pub mod order_repository;

pub use coupon_repository::CouponRepository;
pub use order_repository::OrderRepository;

#[cfg(test)]
pub use coupon_repository::MockCouponRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
