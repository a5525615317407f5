//! Business logic services for the application layer.

pub mod coupon_service;
pub mod list_controller;
pub mod order_service;

pub use coupon_service::CouponService;
pub use list_controller::{ListController, ListStatus, PageRequest, PageState};
pub use order_service::{OrderService, Quote};
