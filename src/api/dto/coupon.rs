//! DTO for creating and updating coupons.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_with::skip_serializing_none;
use validator::{Validate, ValidationError};

use crate::domain::entities::{Coupon, CouponType, UsageMode};

/// Request body for `POST coupons` and `PUT coupons/{code}`.
///
/// Doubles as the editable form model: it is validated before submission
/// and stays with the caller after a failed submit so the user can fix it.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[validate(schema(function = "validate_percentage_cap"))]
pub struct CouponRequest {
    #[serde(rename = "coupon_code")]
    #[validate(length(min = 1, max = 255, message = "Coupon code is required"))]
    pub code: String,

    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[serde(rename = "coupon_type")]
    pub kind: CouponType,

    #[serde(rename = "usage")]
    pub usage_mode: UsageMode,

    #[serde(rename = "expired_at")]
    #[validate(required(message = "Expiry date is required"))]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(rename = "coupon_value")]
    #[validate(range(exclusive_min = 0.0, message = "Value must be greater than 0"))]
    pub discount_value: f64,
}

impl Default for CouponRequest {
    fn default() -> Self {
        Self {
            code: String::new(),
            title: String::new(),
            description: String::new(),
            kind: CouponType::Percentage,
            usage_mode: UsageMode::Manual,
            expires_at: None,
            discount_value: 0.0,
        }
    }
}

impl CouponRequest {
    /// Sets the coupon code, upper-cased and trimmed as typed into the form.
    pub fn set_code(&mut self, code: &str) {
        self.code = code.trim().to_uppercase();
    }
}

impl From<&Coupon> for CouponRequest {
    fn from(c: &Coupon) -> Self {
        Self {
            code: c.code.clone(),
            title: c.title.clone(),
            description: c.description.clone(),
            kind: c.kind,
            usage_mode: c.usage_mode,
            expires_at: Some(c.expires_at),
            discount_value: c.discount_value,
        }
    }
}

fn validate_percentage_cap(req: &CouponRequest) -> Result<(), ValidationError> {
    if req.kind == CouponType::Percentage && req.discount_value > 100.0 {
        return Err(ValidationError::new("percentage_cap")
            .with_message("Percentage value cannot exceed 100".into()));
    }
    Ok(())
}
