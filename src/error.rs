use crate::clock::{Day, TimeOfDay};
use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid time of day: {0}. Expected HH:MM within 00:00 and 23:59")]
    InvalidTime(String),
    #[error("Invalid interval on {day}: start {start} must be before end {end}")]
    InvalidInterval {
        day: Day,
        start: TimeOfDay,
        end: TimeOfDay,
    },
    #[error("Invalid coordinate for {name}: ({latitude}, {longitude})")]
    InvalidCoordinate {
        name: String,
        latitude: f64,
        longitude: f64,
    },
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
    #[error("Unknown day of week: {0}")]
    InvalidDay(String),
    #[error("{time} on {day} does not exist unambiguously in {timezone}")]
    NonexistentLocalTime {
        day: Day,
        time: TimeOfDay,
        timezone: String,
    },
    #[error("At least one participant is required")]
    NoParticipants,
    #[error("Participant ({0}) was given more than once")]
    DuplicateParticipant(String),
    #[error("Availability is expressed in both {first} and {second} and no reference timezone was configured")]
    MixedTimezones { first: String, second: String },
    #[error("Range from {start} to {end} spans more than one week")]
    RangeTooLong {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("Invalid value for {key}: {value}")]
    InvalidOption { key: String, value: String },
}
