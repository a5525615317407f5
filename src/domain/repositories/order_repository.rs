//! Repository trait for mock order pricing.

use crate::api::dto::MockOrderRequest;
use crate::domain::entities::MockOrder;
use crate::error::ApiError;
use async_trait::async_trait;

/// Prices a hypothetical order against the coupon rules held by the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Prices an order, applying the coupon if the service accepts it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when the service refuses the coupon
    /// (unknown, expired) or the order.
    async fn mock_order(&self, request: &MockOrderRequest) -> Result<MockOrder, ApiError>;
}
