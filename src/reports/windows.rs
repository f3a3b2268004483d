//! Reporting periods anchored to a single clock reading.
//!
//! All period boundaries come from one `now` converted once into the
//! business timezone. Computing them together keeps every aggregate on a
//! page consistent even when the request straddles midnight.

use time::{Date, Duration, OffsetDateTime};
use time_tz::Tz;

use crate::{
    Error,
    model::EventDate,
    timezone::{self, start_of_day},
};

/// The standard reporting periods for one dashboard render.
#[derive(Debug, Clone, Copy)]
pub struct ReportWindows {
    /// Today's calendar date in the business timezone.
    pub today: Date,
    /// The Sunday that starts the current week.
    pub week_start: Date,
    /// The first day of the current month.
    pub month_start: Date,
    /// The clock reading all spans end at.
    pub now: OffsetDateTime,
    timezone: &'static Tz,
}

impl ReportWindows {
    /// Resolve the reporting periods for `now` in the named timezone.
    ///
    /// Fails with [`Error::InvalidTimezone`] when the name is not a canonical
    /// IANA identifier. A misconfigured timezone silently shifting every
    /// total is worse than a refused report.
    pub fn resolve(now: OffsetDateTime, timezone_name: &str) -> Result<Self, Error> {
        let tz = timezone::find(timezone_name)
            .ok_or_else(|| Error::InvalidTimezone(timezone_name.to_owned()))?;

        let today = timezone::local_date(tz, now);
        let week_start = today - Duration::days(i64::from(today.weekday().number_days_from_sunday()));
        let month_start = today.replace_day(1).expect("every month has a first day");

        Ok(Self {
            today,
            week_start,
            month_start,
            now,
            timezone: tz,
        })
    }

    /// The business timezone these periods were computed in.
    pub fn timezone(&self) -> &'static Tz {
        self.timezone
    }

    /// The calendar-day window for today.
    pub fn today_window(&self) -> Window {
        self.day_window(self.today)
    }

    /// The calendar-day window for an arbitrary date.
    pub fn day_window(&self, date: Date) -> Window {
        Window {
            kind: WindowKind::Day(date),
            timezone: self.timezone,
        }
    }

    /// Start of the current week through now.
    pub fn week_window(&self) -> Window {
        self.span_from(self.week_start)
    }

    /// Start of the current month through now.
    pub fn month_window(&self) -> Window {
        self.span_from(self.month_start)
    }

    /// A window that admits every record, dated or not.
    pub fn all_time(&self) -> Window {
        Window {
            kind: WindowKind::AllTime,
            timezone: self.timezone,
        }
    }

    fn span_from(&self, start: Date) -> Window {
        Window {
            kind: WindowKind::Span {
                start: start_of_day(self.timezone, start),
                end: self.now,
            },
            timezone: self.timezone,
        }
    }
}

/// A time window that classifies event dates as in or out.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    kind: WindowKind,
    timezone: &'static Tz,
}

#[derive(Debug, Clone, Copy)]
enum WindowKind {
    /// Matches events whose local calendar date equals this date.
    Day(Date),
    /// Matches instants in `start..=end`.
    Span {
        start: OffsetDateTime,
        end: OffsetDateTime,
    },
    AllTime,
}

impl Window {
    /// Whether an event falls within this window.
    ///
    /// Day windows compare calendar dates in the business timezone; spans
    /// compare instants with inclusive bounds. Undated events match neither,
    /// but the all-time window carries no date filter at all, so lifetime
    /// totals still count records whose dates could not be parsed.
    pub fn contains(&self, event: Option<EventDate>) -> bool {
        match self.kind {
            WindowKind::AllTime => true,
            WindowKind::Day(date) => {
                event.is_some_and(|event| event.calendar_date(self.timezone) == date)
            }
            WindowKind::Span { start, end } => event.is_some_and(|event| {
                let instant = event.instant(self.timezone);
                start <= instant && instant <= end
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::ReportWindows;
    use crate::model::EventDate;

    const CHICAGO: &str = "America/Chicago";

    fn windows_at(now: time::OffsetDateTime) -> ReportWindows {
        ReportWindows::resolve(now, CHICAGO).unwrap()
    }

    #[test]
    fn an_unknown_timezone_is_refused() {
        let result = ReportWindows::resolve(datetime!(2024-01-16 12:00 UTC), "Mars/Olympus");
        assert!(matches!(result, Err(crate::Error::InvalidTimezone(_))));
    }

    #[test]
    fn periods_are_anchored_to_the_local_date() {
        // 05:55 UTC is still the previous evening in Chicago.
        let windows = windows_at(datetime!(2024-01-16 05:55 UTC));

        assert_eq!(windows.today, date!(2024-01-15));
        // Jan 15 2024 is a Monday, so the week began Sunday the 14th.
        assert_eq!(windows.week_start, date!(2024-01-14));
        assert_eq!(windows.month_start, date!(2024-01-01));
    }

    #[test]
    fn a_utc_instant_lands_on_its_local_day() {
        let windows = windows_at(datetime!(2024-01-16 05:55 UTC));
        let event = EventDate::parse("2024-01-16T03:00:00Z");

        assert!(windows.today_window().contains(event));
        assert!(!windows.day_window(date!(2024-01-16)).contains(event));
    }

    #[test]
    fn spans_are_inclusive_at_both_ends() {
        let now = datetime!(2024-01-15 18:00 UTC);
        let windows = windows_at(now);

        // Week start is Sunday Jan 14 local midnight, which is 06:00 UTC.
        assert!(windows.week_window().contains(EventDate::parse("2024-01-14T06:00:00Z")));
        assert!(windows.week_window().contains(EventDate::parse("2024-01-15T18:00:00Z")));
        assert!(!windows.week_window().contains(EventDate::parse("2024-01-14T05:59:59Z")));
        assert!(!windows.week_window().contains(EventDate::parse("2024-01-15T18:00:01Z")));
    }

    #[test]
    fn week_contains_everything_today_does() {
        let windows = windows_at(datetime!(2024-01-16 05:55 UTC));
        let events = [
            EventDate::parse("2024-01-15T10:00:00-06:00"),
            EventDate::parse("2024-01-15"),
            EventDate::parse("2024-01-16T03:00:00Z"),
        ];

        for event in events {
            assert!(windows.today_window().contains(event));
            assert!(windows.week_window().contains(event));
            assert!(windows.month_window().contains(event));
            assert!(windows.all_time().contains(event));
        }
    }

    #[test]
    fn undated_events_only_match_the_all_time_window() {
        let windows = windows_at(datetime!(2024-01-16 05:55 UTC));

        assert!(!windows.today_window().contains(None));
        assert!(!windows.week_window().contains(None));
        assert!(!windows.month_window().contains(None));
        assert!(windows.all_time().contains(None));
    }

    #[test]
    fn week_start_on_a_sunday_is_that_sunday() {
        // Jan 14 2024 is a Sunday; noon local is 18:00 UTC.
        let windows = windows_at(datetime!(2024-01-14 18:00 UTC));
        assert_eq!(windows.today, date!(2024-01-14));
        assert_eq!(windows.week_start, date!(2024-01-14));
    }
}
