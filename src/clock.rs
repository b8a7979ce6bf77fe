use crate::error::ValidationError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use core::fmt;
use core::str::FromStr;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minutes in a day. Only `TimeOfDay::END_OF_DAY` reaches this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Wall clock time, stored as minutes since midnight (0..=1439).
/// The exclusive end of an interval may also be `END_OF_DAY` (24:00).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);
    pub const LAST_MINUTE: TimeOfDay = TimeOfDay(MINUTES_PER_DAY - 1);
    /// Midnight at the end of the day. Only valid as the end of an interval.
    pub const END_OF_DAY: TimeOfDay = TimeOfDay(MINUTES_PER_DAY);

    /// Construct a `TimeOfDay` from minutes since midnight
    ///
    /// # Examples
    /// ```
    /// use treffpunkt::clock::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::from_minutes(90).unwrap().to_string(), "01:30");
    /// assert!(TimeOfDay::from_minutes(1440).is_err());
    /// ```
    pub fn from_minutes(minutes: u16) -> Result<TimeOfDay, ValidationError> {
        if minutes < MINUTES_PER_DAY {
            Ok(TimeOfDay(minutes))
        } else {
            Err(ValidationError::InvalidTime(format!(
                "{} minutes past midnight",
                minutes
            )))
        }
    }

    /// Like `from_minutes`, but also accepts `MINUTES_PER_DAY` as `END_OF_DAY`
    pub fn from_end_minutes(minutes: u16) -> Result<TimeOfDay, ValidationError> {
        if minutes == MINUTES_PER_DAY {
            Ok(TimeOfDay::END_OF_DAY)
        } else {
            TimeOfDay::from_minutes(minutes)
        }
    }

    pub fn from_hm(hour: u16, minute: u16) -> Result<TimeOfDay, ValidationError> {
        if hour < 24 && minute < 60 {
            Ok(TimeOfDay(hour * 60 + minute))
        } else {
            Err(ValidationError::InvalidTime(format!(
                "{:02}:{:02}",
                hour, minute
            )))
        }
    }

    /// Parses a strict `HH:MM` wall clock value. Both fields take two digits.
    ///
    /// # Examples
    /// ```
    /// use treffpunkt::clock::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::parse("13:30").unwrap().minutes(), 810);
    /// assert!(TimeOfDay::parse("24:00").is_err());
    /// assert!(TimeOfDay::parse("12:60").is_err());
    /// assert!(TimeOfDay::parse("9:05").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<TimeOfDay, ValidationError> {
        let trimmed = input.trim();
        let two_digit_fields = trimmed.len() == 5
            && trimmed
                .char_indices()
                .all(|(i, c)| if i == 2 { c == ':' } else { c.is_ascii_digit() });

        if !two_digit_fields {
            return Err(ValidationError::InvalidTime(input.to_string()));
        }

        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(TimeOfDay::from)
            .map_err(|_| ValidationError::InvalidTime(input.to_string()))
    }

    /// Parses the end of an interval, where `24:00` means `END_OF_DAY`
    ///
    /// # Examples
    /// ```
    /// use treffpunkt::clock::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::parse_end("24:00"), Ok(TimeOfDay::END_OF_DAY));
    /// assert_eq!(TimeOfDay::parse_end("17:00").unwrap().minutes(), 1020);
    /// assert!(TimeOfDay::parse_end("24:01").is_err());
    /// ```
    pub fn parse_end(input: &str) -> Result<TimeOfDay, ValidationError> {
        if input.trim() == "24:00" {
            Ok(TimeOfDay::END_OF_DAY)
        } else {
            TimeOfDay::parse(input)
        }
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// This time on `date`. `END_OF_DAY` is midnight of the following date.
    pub fn on(self, date: NaiveDate) -> Option<NaiveDateTime> {
        let (date, minutes) = if self == TimeOfDay::END_OF_DAY {
            (date.succ_opt()?, 0)
        } else {
            (date, self.0)
        };

        date.and_hms_opt(u32::from(minutes / 60), u32::from(minutes % 60), 0)
    }
}

/// Seconds are truncated
impl From<NaiveTime> for TimeOfDay {
    fn from(time: NaiveTime) -> Self {
        // hour() < 24 and minute() < 60, so this always fits below MINUTES_PER_DAY
        TimeOfDay((time.hour() * 60 + time.minute()) as u16)
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeOfDay::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Day of the week. Ordering follows the canonical Monday to Sunday enumeration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Days since the Monday of the same week
    pub fn offset(self) -> u32 {
        Weekday::from(self).num_days_from_monday()
    }

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Monday,
            Weekday::Tue => Day::Tuesday,
            Weekday::Wed => Day::Wednesday,
            Weekday::Thu => Day::Thursday,
            Weekday::Fri => Day::Friday,
            Weekday::Sat => Day::Saturday,
            Weekday::Sun => Day::Sunday,
        }
    }
}

impl From<Day> for Weekday {
    fn from(day: Day) -> Self {
        match day {
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
            Day::Sunday => Weekday::Sun,
        }
    }
}

/// Accepts full or three letter English names in any case
///
/// # Examples
/// ```
/// use treffpunkt::clock::Day;
///
/// assert_eq!("monday".parse::<Day>().unwrap(), Day::Monday);
/// assert_eq!("Sun".parse::<Day>().unwrap(), Day::Sunday);
/// assert!("Funday".parse::<Day>().is_err());
/// ```
impl FromStr for Day {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Weekday>()
            .map(Day::from)
            .map_err(|_| ValidationError::InvalidDay(s.to_string()))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
