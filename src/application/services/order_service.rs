//! Mock order pricing service.

use crate::api::dto::MockOrderRequest;
use crate::domain::entities::{Coupon, MockOrder};
use crate::domain::repositories::OrderRepository;
use crate::error::ApiError;
use crate::utils::money::format_vnd;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// Price summary of a mock order.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub original: f64,
    pub discount: f64,
    pub final_amount: f64,
    pub coupon_code: Option<String>,
    /// Coupon the service applied, if any.
    pub coupon: Option<Coupon>,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    pub fn original_display(&self) -> String {
        format_vnd(self.original)
    }

    pub fn discount_display(&self) -> String {
        format_vnd(self.discount)
    }

    pub fn final_display(&self) -> String {
        format_vnd(self.final_amount)
    }
}

impl From<MockOrder> for Quote {
    fn from(order: MockOrder) -> Self {
        Self {
            original: order.cost,
            discount: order.discount(),
            final_amount: order.total_amount,
            coupon_code: order.coupon_code,
            coupon: order.coupon,
            created_at: order.created_at,
        }
    }
}

/// Prices hypothetical orders to preview what a coupon would do.
pub struct OrderService<R: OrderRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: OrderRepository + ?Sized> OrderService<R> {
    /// Creates a new order service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Prices an order of `cost` placed at `created_at`.
    ///
    /// A blank `coupon_code` is sent as no coupon.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] if the service refuses the coupon.
    pub async fn quote(
        &self,
        cost: f64,
        coupon_code: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<Quote, ApiError> {
        let request = MockOrderRequest::new(cost, coupon_code, created_at);
        debug!(cost, coupon = ?request.coupon_code, "Pricing mock order");

        let order = self.repository.mock_order(&request).await?;
        Ok(Quote::from(order))
    }
}
