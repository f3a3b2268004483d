//! Helpers for observing instants in the fixed business timezone.
//!
//! Every reporting figure in the application is scoped by calendar days as
//! observed in a single canonical IANA zone, no matter where the server or
//! the backend that produced the snapshot happen to run.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone, Tz, timezones};

/// Look up a canonical timezone by name, e.g. "America/Chicago".
pub fn find(canonical_timezone: &str) -> Option<&'static Tz> {
    timezones::get_by_name(canonical_timezone)
}

/// The UTC offset the zone observes at `instant`.
pub fn offset_at(timezone: &Tz, instant: OffsetDateTime) -> UtcOffset {
    timezone.get_offset_utc(&instant).to_utc()
}

/// The calendar date of `instant` as observed in `timezone`.
pub fn local_date(timezone: &Tz, instant: OffsetDateTime) -> Date {
    instant.to_offset(offset_at(timezone, instant)).date()
}

/// Midnight at the start of `date` in `timezone`, as an instant.
///
/// The offset is resolved from a provisional midnight and then refined, so
/// a date on the far side of a DST transition uses the offset in force at
/// that midnight rather than the offset in force right now.
pub fn start_of_day(timezone: &Tz, date: Date) -> OffsetDateTime {
    let provisional = offset_at(timezone, date.midnight().assume_utc());
    let refined = offset_at(timezone, date.midnight().assume_offset(provisional));

    date.midnight().assume_offset(refined)
}
