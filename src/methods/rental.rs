use chrono::{Duration, NaiveDate};
use diesel::prelude::*;
use rand::Rng;
use serde_derive::{Deserialize, Serialize};

use crate::POOL;
use crate::model::Rental;

// An active rental whose end date falls within this many days of today is
// surfaced in the expiring bucket.
pub const EXPIRY_WINDOW_DAYS: i64 = 3;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Categorized {
    pub active: Vec<Rental>,
    pub expiring_soon: Vec<Rental>,
    pub finished: Vec<Rental>,
}

/// Reclassify every rental against `today`.
///
/// Buckets are never persisted; they are recomputed from `is_active` and the
/// end date on every read, so a listing is always consistent with the
/// current date without any background bookkeeping. A rental with no
/// readable end date keeps running rather than erroring out. Overdue
/// rentals stay in the expiring bucket until the nightly task or an admin
/// closes them.
pub fn categorize(rentals: Vec<Rental>, today: NaiveDate) -> Categorized {
    let horizon = today + Duration::days(EXPIRY_WINDOW_DAYS);
    let mut buckets = Categorized::default();
    for rental in rentals {
        if !rental.is_active {
            buckets.finished.push(rental);
            continue;
        }
        match rental.end_date {
            None => buckets.active.push(rental),
            Some(end) if end < today => buckets.expiring_soon.push(rental),
            Some(end) if end <= horizon => buckets.expiring_soon.push(rental),
            Some(_) => buckets.active.push(rental),
        }
    }
    buckets
}

pub fn generate_unique_rental_confirmation() -> String {
    // Define the allowed characters: digits 0-9 and uppercase A-Z.
    let charset: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut rng = rand::rng();

    loop {
        // Generate a random 8-character string.
        let confirmation: String = (0..8)
            .map(|_| {
                let idx = rng.random_range(0..charset.len());
                charset[idx] as char
            })
            .collect();

        // Check if the generated confirmation already exists in the rentals table.
        let exists = {
            let mut conn = POOL.clone().get().expect("Failed to get DB connection");

            // If there's an error performing the query, treat it as "exists = true" so we retry.
            diesel::select(diesel::dsl::exists(
                crate::schema::rentals::table
                    .filter(crate::schema::rentals::confirmation.eq(&confirmation)),
            ))
            .get_result::<bool>(&mut conn)
            .unwrap_or_else(|e| {
                eprintln!("Database error checking rental confirmation: {:?}", e);
                true
            })
        };

        // If the confirmation does not exist, return it.
        if !exists {
            return confirmation;
        }
        // Otherwise, loop again and generate a new one.
    }
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn rental(id: i32, is_active: bool, end_date: Option<NaiveDate>) -> Rental {
        Rental {
            id,
            confirmation: format!("TEST{:04}", id),
            car_id: 1,
            user_id: 1,
            start_date: d(2024, 5, 1),
            end_date,
            daily_rate: 50.0,
            total: 150.0,
            observation: None,
            is_active,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 15, 0, 0).unwrap(),
        }
    }

    fn ids(bucket: &[Rental]) -> Vec<i32> {
        bucket.iter().map(|r| r.id).collect()
    }

    #[test]
    fn inactive_is_finished_regardless_of_dates() {
        let today = d(2024, 6, 10);
        let buckets = categorize(vec![rental(1, false, Some(d(2024, 6, 1)))], today);
        assert_eq!(ids(&buckets.finished), vec![1]);
        assert!(buckets.active.is_empty());
        assert!(buckets.expiring_soon.is_empty());
    }

    #[test]
    fn overdue_but_active_counts_as_expiring() {
        let today = d(2024, 6, 10);
        let buckets = categorize(vec![rental(2, true, Some(d(2024, 6, 5)))], today);
        assert_eq!(ids(&buckets.expiring_soon), vec![2]);
    }

    #[test]
    fn inside_three_day_window_is_expiring() {
        let today = d(2024, 6, 10);
        for day in [10, 11, 12, 13] {
            let buckets = categorize(vec![rental(day, true, Some(d(2024, 6, day as u32)))], today);
            assert_eq!(ids(&buckets.expiring_soon), vec![day], "end day {}", day);
        }
    }

    #[test]
    fn beyond_the_window_is_active() {
        let today = d(2024, 6, 10);
        let buckets = categorize(vec![rental(3, true, Some(d(2024, 6, 20)))], today);
        assert_eq!(ids(&buckets.active), vec![3]);
    }

    #[test]
    fn missing_end_date_fails_open_to_active() {
        let today = d(2024, 6, 10);
        let buckets = categorize(vec![rental(4, true, None)], today);
        assert_eq!(ids(&buckets.active), vec![4]);
    }

    #[test]
    fn full_listing_splits_into_all_three_buckets() {
        let today = d(2024, 6, 10);
        let buckets = categorize(
            vec![
                rental(1, false, Some(d(2024, 6, 1))),
                rental(2, true, Some(d(2024, 6, 5))),
                rental(3, true, Some(d(2024, 6, 12))),
                rental(4, true, Some(d(2024, 6, 20))),
                rental(5, true, None),
            ],
            today,
        );
        assert_eq!(ids(&buckets.finished), vec![1]);
        assert_eq!(ids(&buckets.expiring_soon), vec![2, 3]);
        assert_eq!(ids(&buckets.active), vec![4, 5]);
    }
}
