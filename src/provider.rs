//! Narrow interfaces to the services that feed the scheduler.
//!
//! Geocoding, place search and calendar free/busy lookups live outside this
//! crate. Implementations talk to whatever backend they like; the functions
//! here only turn their answers into participants and availability, and
//! hand their failures back to the caller untouched.

use crate::availability::{split_by_day, AvailabilityInterval};
use crate::error::ValidationError;
use crate::geo::{midpoint, GeoPoint};
use crate::participant::Participant;
use crate::time::{Available, TimeRange};
use chrono::{Duration, NaiveDateTime};
use chrono_tz::Tz;
use log::debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("No match found for {0}")]
    NotFound(String),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Resolves a place name into coordinates
pub trait GeocodeResolver {
    fn resolve(&self, place_name: &str) -> Result<GeoPoint, LookupError>;
}

/// Finds points of interest around a location.
/// Nothing within `radius_meters` is an empty list, not an error.
pub trait PlaceSearch {
    fn nearby(
        &self,
        center: &GeoPoint,
        category: &str,
        radius_meters: u32,
        limit: usize,
    ) -> Result<Vec<GeoPoint>, LookupError>;
}

/// Busy blocks of a participant between `start` and `end`, as local wall clock times
pub trait CalendarFreeBusy {
    fn fetch(
        &self,
        participant_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<TimeRange<NaiveDateTime>>, LookupError>;
}

/// Everything in `range` that is not `busy`, cut into per-day intervals.
///
/// Intervals only carry a weekday, so `range` may span at most one week.
/// Longer ranges are rejected with `RangeTooLong`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use treffpunkt::provider::free_intervals;
/// use treffpunkt::time::TimeRange;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
///
/// let busy = vec![TimeRange::new(at(10, 0), at(11, 0))];
/// let free = free_intervals(&busy, TimeRange::new(at(9, 0), at(17, 0)), chrono_tz::UTC).unwrap();
///
/// assert_eq!(free.len(), 2);
/// assert_eq!(free[0].to_string(), "Monday: 09:00-10:00 (UTC)");
/// assert_eq!(free[1].to_string(), "Monday: 11:00-17:00 (UTC)");
/// ```
pub fn free_intervals(
    busy: &[TimeRange<NaiveDateTime>],
    range: TimeRange<NaiveDateTime>,
    timezone: Tz,
) -> Result<Vec<AvailabilityInterval>, ValidationError> {
    within_a_week(range)?;

    Ok(busy
        .iter()
        .get_availability(&[range])
        .into_iter()
        .flat_map(|free| split_by_day(free.start(), free.end(), timezone))
        .collect())
}

fn within_a_week(range: TimeRange<NaiveDateTime>) -> Result<(), ValidationError> {
    if range.end() - range.start() > Duration::days(7) {
        Err(ValidationError::RangeTooLong {
            start: range.start(),
            end: range.end(),
        })
    } else {
        Ok(())
    }
}

/// Asks `calendar` for a participant's busy blocks and derives their availability.
/// A range longer than one week fails before the calendar is asked.
pub fn fetch_availability<C>(
    calendar: &C,
    participant_id: &str,
    range: TimeRange<NaiveDateTime>,
    timezone: Tz,
) -> Result<Vec<AvailabilityInterval>, LookupError>
where
    C: CalendarFreeBusy + ?Sized,
{
    within_a_week(range)?;

    let busy = calendar.fetch(participant_id, range.start(), range.end())?;
    debug!(
        "({}) is busy {} times between {} and {}",
        participant_id,
        busy.len(),
        range.start(),
        range.end()
    );

    free_intervals(&busy, range, timezone).map_err(LookupError::from)
}

/// Geocodes `place_name` and uses it as the home of a new participant
pub fn resolve_participant<R>(
    resolver: &R,
    id: &str,
    place_name: &str,
) -> Result<Participant, LookupError>
where
    R: GeocodeResolver + ?Sized,
{
    resolver
        .resolve(place_name)
        .map(|home| Participant::new(id, home))
}

/// Searches for `category` places around the midpoint of everyone's home
pub fn nearby_meeting_points<S>(
    search: &S,
    participants: &[Participant],
    category: &str,
    radius_meters: u32,
    limit: usize,
) -> Result<Vec<GeoPoint>, LookupError>
where
    S: PlaceSearch + ?Sized,
{
    match midpoint(participants.iter().map(|participant| participant.home())) {
        Some(center) => search.nearby(&center, category, radius_meters, limit),
        None => Ok(vec![]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Day;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    struct Atlas(HashMap<&'static str, GeoPoint>);

    impl GeocodeResolver for Atlas {
        fn resolve(&self, place_name: &str) -> Result<GeoPoint, LookupError> {
            self.0
                .get(place_name)
                .cloned()
                .ok_or_else(|| LookupError::NotFound(place_name.to_string()))
        }
    }

    struct Offline;

    impl GeocodeResolver for Offline {
        fn resolve(&self, _: &str) -> Result<GeoPoint, LookupError> {
            Err(LookupError::ServiceUnavailable("connection refused".to_string()))
        }
    }

    impl CalendarFreeBusy for Offline {
        fn fetch(
            &self,
            _: &str,
            _: NaiveDateTime,
            _: NaiveDateTime,
        ) -> Result<Vec<TimeRange<NaiveDateTime>>, LookupError> {
            Err(LookupError::ServiceUnavailable("timeout".to_string()))
        }
    }

    struct Calendar(Vec<TimeRange<NaiveDateTime>>);

    impl CalendarFreeBusy for Calendar {
        fn fetch(
            &self,
            _: &str,
            _: NaiveDateTime,
            _: NaiveDateTime,
        ) -> Result<Vec<TimeRange<NaiveDateTime>>, LookupError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingSearch {
        centers: RefCell<Vec<GeoPoint>>,
    }

    impl PlaceSearch for RecordingSearch {
        fn nearby(
            &self,
            center: &GeoPoint,
            category: &str,
            _: u32,
            limit: usize,
        ) -> Result<Vec<GeoPoint>, LookupError> {
            self.centers.borrow_mut().push(center.clone());
            Ok((0..limit)
                .map(|i| {
                    GeoPoint::new(&format!("{} {}", category, i), center.latitude(), center.longitude())
                        .unwrap()
                })
                .collect())
        }
    }

    #[test]
    fn resolves_home() {
        let park = GeoPoint::new("Central Park", 40.7829, -73.9654).unwrap();
        let atlas = Atlas(vec![("Central Park", park.clone())].into_iter().collect());

        let alice = resolve_participant(&atlas, "alice", "Central Park").unwrap();
        assert_eq!(alice.home(), &park);
        assert_eq!(alice.meeting_points(), &[park]);
    }

    #[test]
    fn lookup_failures_propagate() {
        let atlas = Atlas(HashMap::new());
        assert_eq!(
            resolve_participant(&atlas, "bob", "Atlantis"),
            Err(LookupError::NotFound("Atlantis".to_string()))
        );
        assert!(matches!(
            resolve_participant(&Offline, "bob", "Downtown"),
            Err(LookupError::ServiceUnavailable(_))
        ));
        assert!(matches!(
            fetch_availability(
                &Offline,
                "bob",
                TimeRange::new(at(1, 0, 0), at(8, 0, 0)),
                chrono_tz::UTC
            ),
            Err(LookupError::ServiceUnavailable(_))
        ));
    }

    #[test]
    fn busy_blocks_are_complemented_across_days() {
        let calendar = Calendar(vec![
            TimeRange::new(at(1, 0, 0), at(1, 9, 0)),
            TimeRange::new(at(1, 12, 0), at(2, 10, 0)),
            // Outside the query range
            TimeRange::new(at(5, 9, 0), at(5, 10, 0)),
        ]);

        let free = fetch_availability(
            &calendar,
            "alice",
            TimeRange::new(at(1, 0, 0), at(2, 18, 0)),
            chrono_tz::UTC,
        )
        .unwrap();

        let summary: Vec<_> = free
            .iter()
            .map(|i| (i.day(), i.start().to_string(), i.end().to_string()))
            .collect();

        assert_eq!(
            summary,
            vec![
                (Day::Monday, "09:00".to_string(), "12:00".to_string()),
                (Day::Tuesday, "10:00".to_string(), "18:00".to_string()),
            ]
        );
    }

    #[test]
    fn no_busy_blocks_is_the_whole_range() {
        let free = free_intervals(
            &[],
            TimeRange::new(at(3, 8, 0), at(3, 12, 30)),
            chrono_tz::Europe::Paris,
        )
        .unwrap();

        assert_eq!(free.len(), 1);
        assert_eq!(free[0].to_string(), "Wednesday: 08:00-12:30 (Europe/Paris)");
    }

    #[test]
    fn ranges_longer_than_a_week_are_rejected() {
        // Free only 09:00-17:00 on the first Monday, busy all of the second one
        let calendar = Calendar(vec![
            TimeRange::new(at(1, 0, 0), at(1, 9, 0)),
            TimeRange::new(at(1, 17, 0), at(15, 0, 0)),
        ]);

        assert_eq!(
            fetch_availability(
                &calendar,
                "alice",
                TimeRange::new(at(1, 0, 0), at(15, 0, 0)),
                chrono_tz::UTC
            ),
            Err(LookupError::Invalid(ValidationError::RangeTooLong {
                start: at(1, 0, 0),
                end: at(15, 0, 0),
            }))
        );
        assert!(matches!(
            fetch_availability(
                &Offline,
                "alice",
                TimeRange::new(at(1, 0, 0), at(8, 0, 1)),
                chrono_tz::UTC
            ),
            Err(LookupError::Invalid(ValidationError::RangeTooLong { .. }))
        ));

        let week = fetch_availability(
            &calendar,
            "alice",
            TimeRange::new(at(1, 0, 0), at(8, 0, 0)),
            chrono_tz::UTC,
        )
        .unwrap();
        assert_eq!(
            week.iter().map(|i| i.to_string()).collect::<Vec<_>>(),
            vec!["Monday: 09:00-17:00 (UTC)"]
        );
    }

    #[test]
    fn searches_around_the_midpoint() {
        let participants = vec![
            Participant::new("a", GeoPoint::new("A", 40.0, -74.0).unwrap()),
            Participant::new("b", GeoPoint::new("B", 42.0, -72.0).unwrap()),
        ];
        let search = RecordingSearch::default();

        let places = nearby_meeting_points(&search, &participants, "cafe", 5000, 3).unwrap();

        assert_eq!(places.len(), 3);
        let centers = search.centers.borrow();
        assert_eq!(centers.len(), 1);
        assert_eq!(centers[0].latitude(), 41.0);
        assert_eq!(centers[0].longitude(), -73.0);

        assert!(nearby_meeting_points(&search, &[], "cafe", 5000, 3)
            .unwrap()
            .is_empty());
    }
}
