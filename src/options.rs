use crate::error::ValidationError;
use crate::rank::Aggregate;
use chrono::NaiveDate;
use chrono_tz::Tz;
#[cfg(feature = "serde")]
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub const ENV_TIMEZONE: &str = "TREFFPUNKT_TIMEZONE";
pub const ENV_ANCHOR_DATE: &str = "TREFFPUNKT_ANCHOR_DATE";
pub const ENV_MIN_DURATION: &str = "TREFFPUNKT_MIN_DURATION";
pub const ENV_AGGREGATE: &str = "TREFFPUNKT_AGGREGATE";

#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerOptions {
    /// Zone every interval is converted into before intersecting.
    /// Without one, all intervals must already share a zone.
    pub reference_timezone: Option<Tz>,
    /// Any date in the week whose UTC offsets apply to conversions
    pub anchor_date: NaiveDate,
    /// Windows shorter than this many minutes are not reported
    pub min_duration: u16,
    /// Scoring used by `Scheduler::best`
    pub aggregate: Aggregate,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        SchedulerOptions {
            reference_timezone: None,
            anchor_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
            min_duration: 0,
            aggregate: Aggregate::Sum,
        }
    }
}

impl SchedulerOptions {
    /// Defaults, overridden by whichever `TREFFPUNKT_*` variables are set
    pub fn from_env() -> Result<SchedulerOptions, ValidationError> {
        SchedulerOptions::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<SchedulerOptions, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SchedulerOptions::default();

        Ok(SchedulerOptions {
            reference_timezone: lookup(ENV_TIMEZONE)
                .map(|zone| parse_var::<Tz>(ENV_TIMEZONE, &zone))
                .transpose()?
                .or(defaults.reference_timezone),
            anchor_date: lookup(ENV_ANCHOR_DATE)
                .map(|date| parse_var(ENV_ANCHOR_DATE, &date))
                .transpose()?
                .unwrap_or(defaults.anchor_date),
            min_duration: lookup(ENV_MIN_DURATION)
                .map(|minutes| parse_var(ENV_MIN_DURATION, &minutes))
                .transpose()?
                .unwrap_or(defaults.min_duration),
            aggregate: lookup(ENV_AGGREGATE)
                .map(|aggregate| parse_var(ENV_AGGREGATE, &aggregate))
                .transpose()?
                .unwrap_or(defaults.aggregate),
        })
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, ValidationError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ValidationError::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
        })
}
