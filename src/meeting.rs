use crate::clock::{Day, TimeOfDay};
use crate::participant::Participant;
use crate::time::{Intersect, TimeRange};
use core::fmt;
use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::Serialize;

/// A stretch of `day` during which every participant is free
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommonWindow {
    pub day: Day,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl CommonWindow {
    /// Length of the window in minutes
    pub fn duration(&self) -> u16 {
        self.range().len()
    }

    pub fn range(&self) -> TimeRange<u16> {
        TimeRange::new(self.start.minutes(), self.end.minutes())
    }

    fn from_range(day: Day, range: TimeRange<u16>) -> Option<CommonWindow> {
        Some(CommonWindow {
            day,
            start: TimeOfDay::from_minutes(range.start()).ok()?,
            end: TimeOfDay::from_end_minutes(range.end()).ok()?,
        })
    }
}

impl fmt::Display for CommonWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}

/// Reduces every participant's availability on `day` to the windows they
/// all share, in start order.
///
/// A day on which any participant has no availability yields nothing.
/// All intervals are expected to be in the same timezone already.
///
/// # Examples
/// ```
/// use treffpunkt::availability::AvailabilityInterval;
/// use treffpunkt::clock::Day;
/// use treffpunkt::geo::GeoPoint;
/// use treffpunkt::meeting::common_windows;
/// use treffpunkt::participant::Participant;
///
/// let home = GeoPoint::new("Home", 0.0, 0.0).unwrap();
///
/// let mut a = Participant::new("a", home.clone());
/// a.add_availability(AvailabilityInterval::parse("Monday", "09:00", "10:00", "UTC").unwrap());
/// a.add_availability(AvailabilityInterval::parse("Monday", "13:00", "14:00", "UTC").unwrap());
///
/// let mut b = Participant::new("b", home);
/// b.add_availability(AvailabilityInterval::parse("Monday", "13:30", "15:00", "UTC").unwrap());
///
/// let windows = common_windows(&[a, b], Day::Monday);
/// assert_eq!(windows.len(), 1);
/// assert_eq!(windows[0].to_string(), "Monday 13:30-14:00");
/// ```
pub fn common_windows(participants: &[Participant], day: Day) -> Vec<CommonWindow> {
    let (first, rest) = match participants.split_first() {
        Some(split) => split,
        None => return vec![],
    };

    let mut common = first.day_ranges(day);

    for participant in rest {
        if common.is_empty() {
            break;
        }

        let ranges = participant.day_ranges(day);
        trace!(
            "Intersecting {:?} with ({}) {:?} on {}",
            common,
            participant.id(),
            ranges,
            day
        );
        common = common.iter().intersect(&ranges);
    }

    debug!(
        "{} common windows on {} across {} participants",
        common.len(),
        day,
        participants.len()
    );

    common
        .into_iter()
        .filter_map(|range| CommonWindow::from_range(day, range))
        .collect()
}
