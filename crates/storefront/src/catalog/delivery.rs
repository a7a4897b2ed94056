//! Pincode-based delivery estimate.
//!
//! A placeholder business heuristic, not a carrier integration: orders
//! placed on a weekend ship Monday and arrive two days later than weekday
//! orders. Kept as a pure function of the pincode and the current date so it
//! is trivially testable.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Cash-on-delivery availability shown alongside the estimate.
pub const CASH_ON_DELIVERY: &str = "Available";

/// Pincodes must be exactly this many characters to produce an estimate.
const PINCODE_LENGTH: usize = 6;

/// Days until delivery for an order placed on a weekday.
const WEEKDAY_LEAD_DAYS: u64 = 6;

/// Days until delivery for an order placed on a weekend.
const WEEKEND_LEAD_DAYS: u64 = 8;

/// A derived, ephemeral delivery estimate. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryEstimate {
    /// Formatted arrival date, e.g. "3 Sep 2026".
    pub date: String,
    /// Cash-on-delivery availability.
    pub cash_on_delivery: &'static str,
}

/// Compute the delivery estimate for a pincode, or `None` when the code is
/// not exactly six characters.
#[must_use]
pub fn estimate(code: &str, today: NaiveDate) -> Option<DeliveryEstimate> {
    if code.chars().count() != PINCODE_LENGTH {
        return None;
    }

    let lead_days = match today.weekday() {
        Weekday::Sat | Weekday::Sun => WEEKEND_LEAD_DAYS,
        _ => WEEKDAY_LEAD_DAYS,
    };
    let arrival = today.checked_add_days(Days::new(lead_days))?;

    Some(DeliveryEstimate {
        date: arrival.format("%-d %b %Y").to_string(),
        cash_on_delivery: CASH_ON_DELIVERY,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_estimate_requires_exactly_six_characters() {
        let today = date(2026, 8, 28);
        assert!(estimate("", today).is_none());
        assert!(estimate("11001", today).is_none());
        assert!(estimate("1100011", today).is_none());
        assert!(estimate("110001", today).is_some());
    }

    #[test]
    fn test_weekday_order_arrives_six_days_later() {
        // 2026-08-28 is a Friday
        let friday = date(2026, 8, 28);
        let est = estimate("110001", friday).unwrap();
        assert_eq!(est.date, "3 Sep 2026");
    }

    #[test]
    fn test_weekend_order_arrives_eight_days_later() {
        // 2026-08-29 is a Saturday, 2026-08-30 a Sunday
        let saturday = date(2026, 8, 29);
        assert_eq!(estimate("110001", saturday).unwrap().date, "6 Sep 2026");

        let sunday = date(2026, 8, 30);
        assert_eq!(estimate("110001", sunday).unwrap().date, "7 Sep 2026");
    }

    #[test]
    fn test_every_weekday_uses_six_day_lead() {
        // 2026-08-24 through 2026-08-28 are Monday..Friday
        for day in 24..=28 {
            let today = date(2026, 8, day);
            let arrival = today.checked_add_days(Days::new(6)).unwrap();
            let est = estimate("560038", today).unwrap();
            assert_eq!(est.date, arrival.format("%-d %b %Y").to_string());
        }
    }

    #[test]
    fn test_cash_on_delivery_is_static() {
        let est = estimate("400001", date(2026, 8, 28)).unwrap();
        assert_eq!(est.cash_on_delivery, "Available");
    }
}
