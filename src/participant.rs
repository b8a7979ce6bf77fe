use crate::availability::AvailabilityInterval;
use crate::clock::Day;
use crate::error::ValidationError;
use crate::geo::GeoPoint;
use crate::time::{TimeMerge, TimeRange};
use chrono::NaiveDate;
use chrono_tz::Tz;
use log::debug;
#[cfg(feature = "serde")]
use serde::Serialize;

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Participant {
    id: String,
    home: GeoPoint,
    availability: Vec<AvailabilityInterval>,
    #[cfg_attr(feature = "serde", serde(rename = "meetingPoints"))]
    meeting_points: Vec<GeoPoint>,
}

impl Participant {
    /// Constructs a new Participant with no availability.
    /// The only place they are willing to meet is `home`.
    pub fn new(id: &str, home: GeoPoint) -> Participant {
        Participant {
            id: id.to_string(),
            meeting_points: vec![home.clone()],
            home,
            availability: vec![],
        }
    }

    /// Like `new`, with an explicit set of meeting points.
    /// An empty `meeting_points` falls back to `home`.
    pub fn with_meeting_points(id: &str, home: GeoPoint, meeting_points: Vec<GeoPoint>) -> Participant {
        let mut participant = Participant::new(id, home);
        if !meeting_points.is_empty() {
            participant.meeting_points.clear();
            meeting_points
                .into_iter()
                .for_each(|point| participant.add_meeting_point(point));
        }
        participant
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn home(&self) -> &GeoPoint {
        &self.home
    }

    pub fn availability(&self) -> &[AvailabilityInterval] {
        &self.availability
    }

    pub fn meeting_points(&self) -> &[GeoPoint] {
        &self.meeting_points
    }

    pub fn add_availability(&mut self, interval: AvailabilityInterval) {
        self.availability.push(interval);
    }

    /// Points are a set: adding one that is already present does nothing
    pub fn add_meeting_point(&mut self, point: GeoPoint) {
        if !self.meeting_points.contains(&point) {
            self.meeting_points.push(point);
        }
    }

    /// Gets the availability for this participant on `day` as
    /// sorted, disjoint minute ranges. Overlapping or touching
    /// intervals are merged together.
    pub fn day_ranges(&self, day: Day) -> Vec<TimeRange<u16>> {
        self.availability
            .iter()
            .filter(|interval| interval.day() == day)
            .map(|interval| interval.range())
            .collect::<Vec<_>>()
            .iter()
            .time_merge()
    }

    /// A copy of this participant with every interval expressed in `target`
    pub fn normalized(&self, target: Tz, anchor: NaiveDate) -> Result<Participant, ValidationError> {
        let mut availability = Vec::with_capacity(self.availability.len());
        for interval in self.availability.iter() {
            availability.extend(interval.to_timezone(target, anchor)?);
        }

        debug!(
            "Normalized {} intervals of ({}) into {} ({} after conversion)",
            self.availability.len(),
            self.id,
            target,
            availability.len()
        );

        Ok(Participant {
            availability,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> GeoPoint {
        GeoPoint::new("Home", 40.7128, -74.0060).unwrap()
    }

    #[test]
    fn defaults_to_home_as_meeting_point() {
        let participant = Participant::new("alice", home());
        assert_eq!(participant.meeting_points(), &[home()]);
        assert!(participant.availability().is_empty());
    }

    #[test]
    fn empty_meeting_points_fall_back_to_home() {
        let participant = Participant::with_meeting_points("alice", home(), vec![]);
        assert_eq!(participant.meeting_points(), &[home()]);
    }

    #[test]
    fn explicit_meeting_points_replace_home() {
        let cafe = GeoPoint::new("Cafe", 40.72, -74.0).unwrap();
        let participant =
            Participant::with_meeting_points("alice", home(), vec![cafe.clone(), cafe.clone()]);
        assert_eq!(participant.meeting_points(), &[cafe]);
    }

    #[test]
    fn add_meeting_point_ignores_duplicates() {
        let mut participant = Participant::new("alice", home());
        let library = GeoPoint::new("Library", 40.73, -73.93).unwrap();

        participant.add_meeting_point(library.clone());
        participant.add_meeting_point(GeoPoint::new("Library", 40.73, -73.93).unwrap());
        participant.add_meeting_point(home());

        assert_eq!(participant.meeting_points(), &[home(), library]);
    }

    #[test]
    fn day_ranges_merge_and_filter_by_day() {
        let mut participant = Participant::new("alice", home());
        for (day, start, end) in [
            ("Monday", "13:00", "14:00"),
            ("Monday", "09:00", "10:00"),
            ("Tuesday", "09:00", "10:00"),
            ("Monday", "09:30", "11:00"),
            ("Monday", "14:00", "15:00"),
        ] {
            participant.add_availability(AvailabilityInterval::parse(day, start, end, "UTC").unwrap());
        }

        assert_eq!(
            participant.day_ranges(Day::Monday),
            vec![TimeRange::new(540, 660), TimeRange::new(780, 900)]
        );
        assert!(participant.day_ranges(Day::Sunday).is_empty());
    }
}
