use chrono::NaiveDate;

use crate::helper_model::PeladoError;
use crate::methods::dates;

/// Total owed for `days` billable days at `daily_rate`.
///
/// The rate must be a finite, non-negative number; anything else is
/// rejected rather than guessed at. No rounding and no currency formatting
/// happen here, that belongs to the presentation layer.
pub fn compute_total(daily_rate: f64, days: i64) -> Result<f64, PeladoError> {
    if !daily_rate.is_finite() || daily_rate < 0.0 {
        return Err(PeladoError::InvalidRate);
    }
    if days > 0 {
        Ok(daily_rate * days as f64)
    } else {
        Ok(0.0)
    }
}

/// Pre-submission check for a candidate rental range. Returns the billable
/// day count. A reversed, equal or zero-day range is rejected here, before
/// any create request is issued.
pub fn validate_rental_dates(start: NaiveDate, end: NaiveDate) -> Result<i64, PeladoError> {
    if end <= start {
        return Err(PeladoError::InvalidDateRange);
    }
    let days = dates::day_count(start, end);
    if days < 1 {
        return Err(PeladoError::InvalidDateRange);
    }
    Ok(days)
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn zero_days_cost_nothing() {
        assert_eq!(compute_total(50.0, 0).unwrap(), 0.0);
    }

    #[test]
    fn rate_times_days() {
        assert_eq!(compute_total(50.0, 3).unwrap(), 150.0);
        assert_eq!(compute_total(0.0, 7).unwrap(), 0.0);
        assert_eq!(compute_total(19.99, 2).unwrap(), 39.98);
    }

    #[test]
    fn rejects_bad_rates() {
        assert_eq!(compute_total(-1.0, 3), Err(PeladoError::InvalidRate));
        assert_eq!(compute_total(f64::NAN, 3), Err(PeladoError::InvalidRate));
        assert_eq!(compute_total(f64::INFINITY, 3), Err(PeladoError::InvalidRate));
    }

    #[test]
    fn same_day_range_rejected() {
        assert_eq!(
            validate_rental_dates(d(2024, 5, 1), d(2024, 5, 1)),
            Err(PeladoError::InvalidDateRange)
        );
    }

    #[test]
    fn reversed_range_rejected() {
        assert_eq!(
            validate_rental_dates(d(2024, 5, 2), d(2024, 5, 1)),
            Err(PeladoError::InvalidDateRange)
        );
    }

    #[test]
    fn one_night_accepted() {
        assert_eq!(validate_rental_dates(d(2024, 5, 1), d(2024, 5, 2)), Ok(1));
    }

    // The end-to-end figures from the booking modal: $50/day for three days.
    #[test]
    fn three_day_booking_totals_150() {
        let days = validate_rental_dates(d(2024, 6, 1), d(2024, 6, 4)).unwrap();
        assert_eq!(days, 3);
        assert_eq!(compute_total(50.0, days).unwrap(), 150.0);
    }

    proptest! {
        #[test]
        fn total_is_product(rate in 0.0f64..10_000.0, days in 1i64..365) {
            prop_assert_eq!(compute_total(rate, days).unwrap(), rate * days as f64);
        }
    }
}
