//! The canonical parsed form of a record timestamp.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};
use time_tz::Tz;

use crate::timezone;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");
const MINUTE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

/// When an event happened, as reported by the backend.
///
/// The backend is not consistent about timestamp precision: browser-created
/// records carry RFC 3339 instants, the Python API writes naive ISO
/// datetimes, and form date pickers produce bare `YYYY-MM-DD` strings. The
/// three cases need different treatment when deciding which business-local
/// calendar day an event belongs to, so the distinction is kept rather than
/// collapsed at parse time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventDate {
    /// A timestamp that carried an explicit UTC offset (or `Z`).
    Instant(OffsetDateTime),
    /// A naive datetime, read as business-local wall-clock time.
    Local(PrimitiveDateTime),
    /// A bare calendar date.
    Day(Date),
}

impl EventDate {
    /// Parse a backend timestamp string.
    ///
    /// Returns `None` for anything unusable. Callers treat an unparseable
    /// date as "this record belongs to no reporting window", never as
    /// "this record happened today".
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        if let Ok(instant) = OffsetDateTime::parse(raw, &Rfc3339) {
            return Some(Self::Instant(instant));
        }

        let date = Date::parse(raw.get(..10)?, DATE_FORMAT).ok()?;

        match raw.get(11..19) {
            Some(clock) => {
                let time = Time::parse(clock, TIME_FORMAT).ok()?;
                Some(Self::Local(PrimitiveDateTime::new(date, time)))
            }
            // The datetime-local input type emits minute precision.
            None => match raw.get(11..16) {
                Some(clock) => {
                    let time = Time::parse(clock, MINUTE_FORMAT).ok()?;
                    Some(Self::Local(PrimitiveDateTime::new(date, time)))
                }
                None => Some(Self::Day(date)),
            },
        }
    }

    /// The calendar day this event falls on, observed in `timezone`.
    pub fn calendar_date(&self, timezone: &Tz) -> Date {
        match self {
            Self::Instant(instant) => timezone::local_date(timezone, *instant),
            Self::Local(datetime) => datetime.date(),
            Self::Day(date) => *date,
        }
    }

    /// The event as an instant, resolving naive values against `timezone`.
    ///
    /// Bare dates are pinned to local midnight so that range comparisons
    /// include them from the start of their day.
    pub fn instant(&self, timezone: &Tz) -> OffsetDateTime {
        match self {
            Self::Instant(instant) => *instant,
            Self::Local(datetime) => {
                let provisional = timezone::offset_at(timezone, datetime.assume_utc());
                let refined =
                    timezone::offset_at(timezone, datetime.assume_offset(provisional));
                datetime.assume_offset(refined)
            }
            Self::Day(date) => timezone::start_of_day(timezone, *date),
        }
    }
}
