//! Repository trait for coupon data access.

use crate::api::dto::{CouponRequest, ListQuery};
use crate::domain::entities::{Coupon, Page};
use crate::error::ApiError;
use async_trait::async_trait;

/// Repository interface for coupons held by the remote coupon API.
///
/// Every method maps to one HTTP call. Error envelopes come back as
/// [`ApiError::Rejected`] whatever the HTTP status was.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpCouponRepository`] - REST implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/http_coupon_repository.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponRepository: Send + Sync {
    /// Lists one page of coupons.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] for error envelopes, other variants for
    /// transport failures.
    async fn list(&self, query: &ListQuery) -> Result<Page<Coupon>, ApiError>;

    /// Fetches a single coupon by code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the service reports the coupon missing.
    async fn get(&self, code: &str) -> Result<Coupon, ApiError>;

    /// Creates a coupon.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the service refuses the coupon
    /// (duplicate code, invalid fields).
    async fn create(&self, request: &CouponRequest) -> Result<Coupon, ApiError>;

    /// Replaces the editable fields of an existing coupon.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the coupon does not exist or the
    /// fields are refused.
    async fn update(&self, code: &str, request: &CouponRequest) -> Result<Coupon, ApiError>;

    /// Deletes a coupon.
    ///
    /// `Ok(())` only once the service confirms the deletion.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the coupon does not exist.
    async fn delete(&self, code: &str) -> Result<(), ApiError>;
}
