use crate::clock::{Day, TimeOfDay};
use crate::error::ValidationError;
use crate::time::TimeRange;
use chrono::{Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use core::fmt;
use log::trace;
#[cfg(feature = "serde")]
use serde::Serialize;

/// A day-of-week tagged [start, end) wall clock range in a given timezone.
/// `start < end` always holds.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AvailabilityInterval {
    day: Day,
    start: TimeOfDay,
    end: TimeOfDay,
    timezone: Tz,
}

impl AvailabilityInterval {
    /// Rejects zero length and inverted ranges. Nothing is swapped.
    ///
    /// # Examples
    /// ```
    /// use treffpunkt::availability::AvailabilityInterval;
    /// use treffpunkt::clock::{Day, TimeOfDay};
    ///
    /// let ten = TimeOfDay::from_hm(10, 0).unwrap();
    /// let noon = TimeOfDay::from_hm(12, 0).unwrap();
    ///
    /// assert!(AvailabilityInterval::new(Day::Monday, ten, noon, chrono_tz::UTC).is_ok());
    /// assert!(AvailabilityInterval::new(Day::Monday, noon, ten, chrono_tz::UTC).is_err());
    /// assert!(AvailabilityInterval::new(Day::Monday, ten, ten, chrono_tz::UTC).is_err());
    /// ```
    pub fn new(
        day: Day,
        start: TimeOfDay,
        end: TimeOfDay,
        timezone: Tz,
    ) -> Result<AvailabilityInterval, ValidationError> {
        if start < end {
            Ok(AvailabilityInterval {
                day,
                start,
                end,
                timezone,
            })
        } else {
            Err(ValidationError::InvalidInterval { day, start, end })
        }
    }

    /// Builds an interval from its textual parts, e.g.
    /// `("Monday", "10:00", "12:00", "America/New_York")`.
    /// The end may be `24:00`.
    pub fn parse(
        day: &str,
        start: &str,
        end: &str,
        timezone: &str,
    ) -> Result<AvailabilityInterval, ValidationError> {
        let timezone = timezone
            .parse::<Tz>()
            .map_err(|_| ValidationError::InvalidTimezone(timezone.to_string()))?;

        AvailabilityInterval::new(
            day.parse()?,
            TimeOfDay::parse(start)?,
            TimeOfDay::parse_end(end)?,
            timezone,
        )
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The wall clock range in minutes since midnight
    pub fn range(&self) -> TimeRange<u16> {
        TimeRange::new(self.start.minutes(), self.end.minutes())
    }

    /// Re-expresses this interval in `target`.
    ///
    /// The interval is pinned to the week containing `anchor` so the
    /// offsets (and DST) of that week apply. A converted range that
    /// crosses midnight is split per day; the part running up to midnight
    /// ends at `TimeOfDay::END_OF_DAY`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use treffpunkt::availability::AvailabilityInterval;
    ///
    /// let anchor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let nyc = AvailabilityInterval::parse("Monday", "10:00", "12:00", "America/New_York").unwrap();
    ///
    /// let utc = nyc.to_timezone(chrono_tz::UTC, anchor).unwrap();
    /// assert_eq!(utc.len(), 1);
    /// assert_eq!(utc[0].start().to_string(), "15:00");
    /// assert_eq!(utc[0].end().to_string(), "17:00");
    /// ```
    pub fn to_timezone(
        &self,
        target: Tz,
        anchor: NaiveDate,
    ) -> Result<Vec<AvailabilityInterval>, ValidationError> {
        if self.timezone == target {
            return Ok(vec![*self]);
        }

        let date = week_start(anchor) + Duration::days(i64::from(self.day.offset()));
        let start = self.localize(date, self.start)?.with_timezone(&target);
        let end = self.localize(date, self.end)?.with_timezone(&target);

        let converted = split_by_day(start.naive_local(), end.naive_local(), target);
        trace!("{} as {} is {:?}", self, target, converted);
        Ok(converted)
    }

    fn localize(
        &self,
        date: NaiveDate,
        time: TimeOfDay,
    ) -> Result<chrono::DateTime<Tz>, ValidationError> {
        match time
            .on(date)
            .map(|local| self.timezone.from_local_datetime(&local))
        {
            Some(LocalResult::Single(datetime)) => Ok(datetime),
            _ => Err(ValidationError::NonexistentLocalTime {
                day: self.day,
                time,
                timezone: self.timezone.name().to_string(),
            }),
        }
    }
}

impl fmt::Display for AvailabilityInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}-{} ({})",
            self.day, self.start, self.end, self.timezone
        )
    }
}

/// Monday of the week containing `date`
pub(crate) fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Cuts a local [start, end) datetime range into one interval per calendar day.
/// Segments that collapse to nothing are dropped.
pub(crate) fn split_by_day(
    start: NaiveDateTime,
    end: NaiveDateTime,
    timezone: Tz,
) -> Vec<AvailabilityInterval> {
    let mut intervals = Vec::new();
    let mut date = start.date();

    while date <= end.date() {
        let from = if date == start.date() {
            TimeOfDay::from(start.time())
        } else {
            TimeOfDay::MIDNIGHT
        };
        let to = if date == end.date() {
            TimeOfDay::from(end.time())
        } else {
            TimeOfDay::END_OF_DAY
        };

        if let Ok(interval) = AvailabilityInterval::new(Day::from(date.weekday()), from, to, timezone)
        {
            intervals.push(interval);
        }

        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    intervals
}
