use chrono::{NaiveTime, Utc};
use diesel::prelude::*;
use std::time::Duration;

use crate::POOL;
use crate::methods::dates;

pub async fn nightly_task() {
    loop {
        // Sleep until the next local midnight of the rental desk, not of the
        // server.
        let now = Utc::now().with_timezone(&dates::BUSINESS_TZ);
        let midnight = now
            .date_naive()
            .succ_opt()
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        let duration_until_midnight = (midnight - now.naive_local())
            .to_std()
            .unwrap_or_else(|_| Duration::from_secs(1));

        tokio::time::sleep(duration_until_midnight).await;

        println!("====== Running Daily Tasks ======");

        let mut pool = POOL.get().unwrap();
        let today = dates::business_today();

        // Close out active rentals whose end date has passed. The listing
        // shows them as expiring until this sweep (or an admin) finishes
        // them.
        use crate::schema::rentals::dsl as r_q;
        let closed = diesel::update(
            r_q::rentals
                .filter(r_q::is_active.eq(true))
                .filter(r_q::end_date.is_not_null())
                .filter(r_q::end_date.lt(today)),
        )
        .set(r_q::is_active.eq(false))
        .execute(&mut pool);
        match closed {
            Ok(count) if count > 0 => println!("Closed {} overdue rentals", count),
            Ok(_) => {}
            Err(e) => eprintln!("Database error closing overdue rentals: {:?}", e),
        }

        let now = Utc::now();
        // Delete expired tokens
        use crate::schema::access_tokens::dsl as at_q;
        if let Err(e) = diesel::delete(at_q::access_tokens.filter(at_q::exp.lt(now))).execute(&mut pool)
        {
            eprintln!("Database error purging access tokens: {:?}", e);
        }
        // Delete expired password resets
        use crate::schema::password_resets::dsl as pr_q;
        if let Err(e) =
            diesel::delete(pr_q::password_resets.filter(pr_q::exp.lt(now))).execute(&mut pool)
        {
            eprintln!("Database error purging password resets: {:?}", e);
        }
        println!("===== Daily Tasks Completed =====");
    }
}
