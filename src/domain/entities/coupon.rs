//! Coupon entity as served by the coupon API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponType {
    /// `discount_value` is a percentage of the order cost.
    Percentage,
    /// `discount_value` is an amount in VND.
    Fixed,
}

impl CouponType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Percentage => "Percentage",
            Self::Fixed => "Fixed",
        }
    }
}

impl fmt::Display for CouponType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a coupon must be entered by the customer or is applied automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageMode {
    Manual,
    Auto,
}

impl UsageMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manual apply",
            Self::Auto => "Automatic apply",
        }
    }
}

impl fmt::Display for UsageMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A discount coupon.
///
/// Immutable snapshot of the server's record. `code` is the unique key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(rename = "coupon_code")]
    pub code: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "coupon_type")]
    pub kind: CouponType,
    #[serde(rename = "usage")]
    pub usage_mode: UsageMode,
    #[serde(rename = "coupon_value")]
    pub discount_value: f64,
    #[serde(rename = "expired_at")]
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Coupon {
    /// Returns true if the coupon expired before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Returns true if the coupon has passed its expiry time.
    ///
    /// Evaluated on every call; never cache the result across renders.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn sample_json() -> serde_json::Value {
        json!({
            "coupon_code": "SALE10",
            "title": "10% off",
            "description": "Ten percent off everything",
            "coupon_type": "percentage",
            "usage": "manual",
            "coupon_value": 10,
            "expired_at": "2026-12-31T23:59:59+07:00",
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-02T00:00:00Z"
        })
    }

    #[test]
    fn test_deserialize_wire_names() {
        let coupon: Coupon = serde_json::from_value(sample_json()).unwrap();

        assert_eq!(coupon.code, "SALE10");
        assert_eq!(coupon.kind, CouponType::Percentage);
        assert_eq!(coupon.usage_mode, UsageMode::Manual);
        assert_eq!(coupon.discount_value, 10.0);
        assert_eq!(
            coupon.expires_at,
            Utc.with_ymd_and_hms(2026, 12, 31, 16, 59, 59).unwrap()
        );
    }

    #[test]
    fn test_unknown_coupon_type_is_rejected() {
        let mut value = sample_json();
        value["coupon_type"] = json!("bogus");
        assert!(serde_json::from_value::<Coupon>(value).is_err());
    }

    #[test]
    fn test_is_expired_at() {
        let mut coupon: Coupon = serde_json::from_value(sample_json()).unwrap();
        let now = coupon.expires_at;

        assert!(!coupon.is_expired_at(now));
        assert!(coupon.is_expired_at(now + Duration::seconds(1)));

        coupon.expires_at = Utc::now() - Duration::minutes(1);
        assert!(coupon.is_expired());
    }

    #[test]
    fn test_labels() {
        assert_eq!(CouponType::Fixed.to_string(), "Fixed");
        assert_eq!(UsageMode::Auto.to_string(), "Automatic apply");
    }
}
