//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`http`] - REST implementations of the repository traits

pub mod http;
