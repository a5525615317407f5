//! Core domain entities.
//!
//! - [`Coupon`] - A discount coupon as served by the coupon API
//! - [`MockOrder`] - An order priced by the mock-order endpoint
//! - [`Page`] - One page of a paginated listing

pub mod coupon;
pub mod order;
pub mod page;

pub use coupon::{Coupon, CouponType, UsageMode};
pub use order::MockOrder;
pub use page::Page;
