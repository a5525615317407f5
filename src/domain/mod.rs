//! Domain layer: coupon entities and the repository contracts used to reach them.
//!
//! # Architecture
//!
//! - [`entities`] - Coupon, mock order and page data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on the HTTP transport; the REST
//! implementations live in [`crate::infrastructure`].

pub mod entities;
pub mod repositories;
