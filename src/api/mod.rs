//! Contract of the remote coupon REST API.
//!
//! # Modules
//!
//! - [`dto`] - Request bodies, query strings and response envelopes
//!
//! The HTTP transport itself lives in [`crate::infrastructure::http`].

pub mod dto;
