//! Mock order pricing result.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::Coupon;

/// A priced order returned by the mock-order endpoint.
///
/// The service decides whether the coupon applies and computes `total_amount`;
/// this side only displays the numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MockOrder {
    pub cost: f64,
    pub total_amount: f64,
    #[serde(default)]
    pub coupon_code: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub coupon: Option<Coupon>,
}

impl MockOrder {
    /// Amount taken off the original cost.
    pub fn discount(&self) -> f64 {
        self.cost - self.total_amount
    }

    /// Returns true when the service applied a coupon.
    pub fn has_coupon(&self) -> bool {
        self.coupon.is_some()
    }
}
