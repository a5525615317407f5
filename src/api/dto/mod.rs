//! Data Transfer Objects for the coupon API wire format.
//!
//! All DTOs use Serde for JSON serialization/deserialization; request bodies
//! use `serde_with::skip_serializing_none` so absent fields never go out as
//! `null`, and the coupon form uses validator for input validation.

pub mod coupon;
pub mod envelope;
pub mod order;
pub mod pagination;

pub use coupon::CouponRequest;
pub use envelope::{AckResponse, ApiResponse, ErrorResponse, PaginatedResponse, decode_envelope};
pub use order::MockOrderRequest;
pub use pagination::{ListQuery, Paging};
