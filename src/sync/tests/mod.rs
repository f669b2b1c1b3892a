//! Unit tests for reload coordination and its consumers.

mod poller_tests;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock frozen at noon UTC of one day.
#[derive(Debug, Clone, Copy)]
struct FixedClock(DateTime<Utc>);

impl FixedClock {
    fn on(day: NaiveDate) -> Self {
        let noon = day.and_hms_opt(12, 0, 0).expect("valid time");
        Self(Utc.from_utc_datetime(&noon))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
}
