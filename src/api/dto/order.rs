//! DTO for the mock order pricing endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_with::skip_serializing_none;

/// Request body for `POST orders/mock`.
///
/// A missing coupon code is left out of the body rather than sent as `null`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MockOrderRequest {
    pub cost: f64,
    pub coupon_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MockOrderRequest {
    /// Builds a request; a blank coupon code counts as no coupon.
    pub fn new(cost: f64, coupon_code: Option<&str>, created_at: DateTime<Utc>) -> Self {
        let coupon_code = coupon_code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Self {
            cost,
            coupon_code,
            created_at,
        }
    }
}
