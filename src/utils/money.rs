//! Amount and discount display.

use crate::domain::entities::CouponType;

/// Formats an amount: integral values without decimals, others with two.
pub fn format_amount(value: f64) -> String {
    // normalizes -0.0 so it never renders as "-0"
    let value = if value == 0.0 { 0.0 } else { value };

    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// `10000 VND`
pub fn format_vnd(value: f64) -> String {
    format!("{} VND", format_amount(value))
}

/// How a coupon's discount value reads: `10%` or `20000 VND`.
pub fn format_discount(kind: CouponType, value: f64) -> String {
    match kind {
        CouponType::Percentage => format!("{}%", format_amount(value)),
        CouponType::Fixed => format_vnd(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(100000.0), "100000");
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(format_amount(-0.0), "0");
        assert_eq!(format_amount(-500.0), "-500");
    }

    #[test]
    fn test_format_discount() {
        assert_eq!(format_discount(CouponType::Percentage, 10.0), "10%");
        assert_eq!(format_discount(CouponType::Fixed, 20000.0), "20000 VND");
        assert_eq!(format_vnd(90000.0), "90000 VND");
    }
}
