//! Civil time handling.
//!
//! Match start times are stored as zone-less civil timestamps expressed in a
//! fixed UTC-3 offset. Every comparison against "now" must happen in that same
//! frame, never in the runtime's local zone.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Offset of the civil frame, in seconds east of UTC.
pub const SOURCE_OFFSET_SECS: i32 = -3 * 3600;

/// The fixed offset match times are expressed in.
pub fn source_offset() -> FixedOffset {
    FixedOffset::east_opt(SOURCE_OFFSET_SECS).expect("source offset is within one day")
}

/// Converts a zoned instant to the civil frame.
pub fn to_civil<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDateTime {
    instant.with_timezone(&source_offset()).naive_local()
}

/// Current civil time.
pub fn civil_now() -> NaiveDateTime {
    to_civil(&Utc::now())
}

/// Completed years between `birth_date` and `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}
