//! Coupon management service.

use crate::api::dto::CouponRequest;
use crate::domain::entities::Coupon;
use crate::domain::repositories::CouponRepository;
use crate::error::{ApiError, SubmitError};
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

/// Service behind the coupon detail, create and edit screens.
///
/// Submissions are validated locally first; a form that fails validation
/// never reaches the network. Forms are borrowed, so after a failed submit
/// the caller still holds the user's input and can resubmit it corrected.
pub struct CouponService<R: CouponRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CouponRepository + ?Sized> CouponService<R> {
    /// Creates a new coupon service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Retrieves a coupon by code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the service does not know the code.
    pub async fn get(&self, code: &str) -> Result<Coupon, ApiError> {
        self.repository.get(code.trim()).await
    }

    /// Creates a coupon from a filled-in form.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] if the form fails validation.
    /// Returns [`SubmitError::Api`] if the service refuses the coupon.
    pub async fn create(&self, form: &CouponRequest) -> Result<Coupon, SubmitError> {
        form.validate()?;

        let created = self.repository.create(form).await?;
        info!(code = %created.code, "Coupon created");
        Ok(created)
    }

    /// Replaces the editable fields of the coupon `code`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Invalid`] if the form fails validation.
    /// Returns [`SubmitError::Api`] if the coupon does not exist or the
    /// service refuses the change.
    pub async fn update(&self, code: &str, form: &CouponRequest) -> Result<Coupon, SubmitError> {
        form.validate()?;

        let updated = self.repository.update(code.trim(), form).await?;
        info!(code = %updated.code, "Coupon updated");
        Ok(updated)
    }

    /// Deletes a coupon.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the coupon does not exist.
    pub async fn delete(&self, code: &str) -> Result<(), ApiError> {
        let code = code.trim();
        self.repository.delete(code).await?;
        debug!(code, "Coupon deleted");
        Ok(())
    }
}
