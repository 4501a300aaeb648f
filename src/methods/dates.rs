//! Calendar-date helpers shared by pricing, categorization and the receipt.
//! All rental math runs on whole calendar dates pinned to noon, so a client
//! offset or a DST switch can never shift a day count across midnight.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

// The rental desk operates on Buenos Aires local dates.
pub const BUSINESS_TZ: Tz = chrono_tz::America::Argentina::Buenos_Aires;

/// Whole billable days between two dates.
///
/// Both ends are pinned to noon and the difference is rounded, never
/// truncated. An empty or reversed range counts as 0 days, which callers
/// treat as "not a billable range".
pub fn day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    let seconds = (at_noon(end) - at_noon(start)).num_seconds();
    let days = (seconds as f64 / 86_400.0).round() as i64;
    days.max(0)
}

fn at_noon(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0).unwrap()
}

/// Parse a client-supplied date, tolerating full ISO-8601 timestamps by
/// keeping only the leading `YYYY-MM-DD`. Returns `None` on anything
/// unparsable; categorization builds on this to fail open.
pub fn parse_client_date(raw: &str) -> Option<NaiveDate> {
    let head: String = raw.trim().chars().take(10).collect();
    NaiveDate::parse_from_str(&head, "%Y-%m-%d").ok()
}

/// Fail-closed variant used on the rental-creation path: a date the desk
/// cannot read is rejected, never guessed.
pub fn require_client_date(raw: &str) -> Result<NaiveDate, crate::helper_model::PeladoError> {
    parse_client_date(raw).ok_or_else(|| crate::helper_model::PeladoError::MalformedDate(raw.to_string()))
}

/// Today's date where the business operates, not where the server runs.
pub fn business_today() -> NaiveDate {
    Utc::now().with_timezone(&BUSINESS_TZ).date_naive()
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn same_day_is_zero() {
        assert_eq!(day_count(d(2024, 5, 1), d(2024, 5, 1)), 0);
    }

    #[test]
    fn next_day_is_one() {
        assert_eq!(day_count(d(2024, 5, 1), d(2024, 5, 2)), 1);
    }

    #[test]
    fn reversed_range_is_zero() {
        assert_eq!(day_count(d(2024, 5, 9), d(2024, 5, 1)), 0);
    }

    #[test]
    fn across_month_boundary() {
        assert_eq!(day_count(d(2024, 6, 1), d(2024, 6, 4)), 3);
        assert_eq!(day_count(d(2024, 1, 31), d(2024, 2, 2)), 2);
    }

    // The count must be the same whether the client clock sat before or
    // after a DST switch. Santiago leaves DST on 2024-04-07; Buenos Aires
    // has no DST at all.
    #[test]
    fn offset_independent_across_dst_boundary() {
        let zones = [chrono_tz::America::Santiago, BUSINESS_TZ];
        for tz in zones {
            let start = tz
                .with_ymd_and_hms(2024, 4, 6, 23, 30, 0)
                .unwrap()
                .date_naive();
            let end = tz
                .with_ymd_and_hms(2024, 4, 8, 0, 30, 0)
                .unwrap()
                .date_naive();
            assert_eq!(day_count(start, end), 2, "zone {:?}", tz);
        }
    }

    #[test]
    fn parses_plain_and_timestamped_dates() {
        assert_eq!(parse_client_date("2024-06-10"), Some(d(2024, 6, 10)));
        assert_eq!(
            parse_client_date("2024-06-10T15:04:05.000Z"),
            Some(d(2024, 6, 10))
        );
        assert_eq!(parse_client_date(" 2024-06-10 "), Some(d(2024, 6, 10)));
        assert_eq!(parse_client_date("10/06/2024"), None);
        assert_eq!(parse_client_date(""), None);
    }

    #[test]
    fn require_rejects_what_parse_drops() {
        assert!(require_client_date("not-a-date").is_err());
        assert_eq!(require_client_date("2024-06-10").unwrap(), d(2024, 6, 10));
    }

    proptest! {
        #[test]
        fn adding_n_days_counts_n(offset in 0i64..3650) {
            let start = d(2020, 1, 1);
            let end = start + Duration::days(offset);
            prop_assert_eq!(day_count(start, end), offset);
        }

        #[test]
        fn never_negative(a in 0i64..3650, b in 0i64..3650) {
            let base = d(2020, 1, 1);
            let count = day_count(base + Duration::days(a), base + Duration::days(b));
            prop_assert!(count >= 0);
        }
    }
}
