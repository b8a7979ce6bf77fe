use crate::clock::Day;
use crate::error::ValidationError;
use crate::geo::GeoPoint;
use crate::meeting::{common_windows, CommonWindow};
use crate::options::SchedulerOptions;
use crate::participant::Participant;
use crate::rank::{best_point, rank, Aggregate};
use itertools::Itertools;
use log::{debug, info};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// One admissible meeting point for one common window
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingSuggestion {
    pub day: Day,
    pub window: CommonWindow,
    pub point: GeoPoint,
    pub distances_km: BTreeMap<String, f64>,
}

/// A common window with every suggestion made for it.
/// `suggestions` is empty when the participants share no meeting point.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPlan {
    pub window: CommonWindow,
    pub suggestions: Vec<MeetingSuggestion>,
}

impl WindowPlan {
    pub fn best(&self, aggregate: Aggregate) -> Option<&MeetingSuggestion> {
        best_point(&self.suggestions, aggregate)
    }
}

/// `windows` is empty when the participants have no common time on `day`
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub day: Day,
    pub windows: Vec<WindowPlan>,
}

/// One `DayPlan` per day of the week, Monday through Sunday
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub days: Vec<DayPlan>,
}

impl Plan {
    pub fn suggestions(&self) -> impl Iterator<Item = &MeetingSuggestion> {
        self.days
            .iter()
            .flat_map(|day| day.windows.iter())
            .flat_map(|window| window.suggestions.iter())
    }

    pub fn windows(&self) -> impl Iterator<Item = &CommonWindow> {
        self.days
            .iter()
            .flat_map(|day| day.windows.iter().map(|window| &window.window))
    }

    pub fn day(&self, day: Day) -> Option<&DayPlan> {
        self.days.iter().find(|plan| plan.day == day)
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    participants: Vec<Participant>,
    options: SchedulerOptions,
}

impl Scheduler {
    /// Constructs a new Scheduler from fully populated participants.
    ///
    /// # Errors
    /// * `NoParticipants` when `participants` is empty
    /// * `DuplicateParticipant` when two participants share an id
    /// * `MixedTimezones` when intervals use different zones and no
    ///   `reference_timezone` is configured
    /// * any conversion error raised while normalizing into the reference zone
    pub fn new(
        participants: Vec<Participant>,
        options: SchedulerOptions,
    ) -> Result<Scheduler, ValidationError> {
        if participants.is_empty() {
            return Err(ValidationError::NoParticipants);
        }

        let mut seen = HashSet::with_capacity(participants.len());
        if let Some(duplicate) = participants.iter().find(|p| !seen.insert(p.id())) {
            return Err(ValidationError::DuplicateParticipant(duplicate.id().to_string()));
        }

        let participants = match options.reference_timezone {
            Some(target) => participants
                .iter()
                .map(|participant| participant.normalized(target, options.anchor_date))
                .collect::<Result<Vec<_>, _>>()?,
            None => {
                let zones = participants
                    .iter()
                    .flat_map(|participant| participant.availability().iter())
                    .map(|interval| interval.timezone())
                    .unique()
                    .take(2)
                    .collect_vec();

                if let [first, second] = zones[..] {
                    return Err(ValidationError::MixedTimezones {
                        first: first.to_string(),
                        second: second.to_string(),
                    });
                }

                participants
            }
        };

        Ok(Scheduler {
            participants,
            options,
        })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    /// Windows on `day` that everyone shares and that last at least `min_duration`
    pub fn common_windows(&self, day: Day) -> Vec<CommonWindow> {
        common_windows(&self.participants, day)
            .into_iter()
            .filter(|window| window.duration() >= self.options.min_duration)
            .collect()
    }

    /// The meeting points every participant has listed, compared by value,
    /// in the order the first participant listed them
    pub fn admissible_points(&self) -> Vec<GeoPoint> {
        let (first, rest) = match self.participants.split_first() {
            Some(split) => split,
            None => return vec![],
        };

        first
            .meeting_points()
            .iter()
            .filter(|point| {
                rest.iter()
                    .all(|participant| participant.meeting_points().contains(point))
            })
            .cloned()
            .collect()
    }

    /// The suggestion for `window` that scores lowest under the configured aggregate
    pub fn best<'a>(&self, window: &'a WindowPlan) -> Option<&'a MeetingSuggestion> {
        window.best(self.options.aggregate)
    }

    fn ranked_points(&self) -> Vec<(GeoPoint, BTreeMap<String, f64>)> {
        self.admissible_points()
            .into_iter()
            .map(|point| {
                let distances = rank(&point, &self.participants);
                (point, distances)
            })
            .collect()
    }

    pub fn plan_day(&self, day: Day) -> DayPlan {
        let ranked = self.ranked_points();

        self.plan_windows(day, &ranked)
    }

    fn plan_windows(&self, day: Day, ranked: &[(GeoPoint, BTreeMap<String, f64>)]) -> DayPlan {
        let windows = self
            .common_windows(day)
            .into_iter()
            .map(|window| WindowPlan {
                window,
                suggestions: ranked
                    .iter()
                    .map(|(point, distances)| MeetingSuggestion {
                        day,
                        window,
                        point: point.clone(),
                        distances_km: distances.clone(),
                    })
                    .collect(),
            })
            .collect_vec();

        debug!("{}: {} windows, {} points each", day, windows.len(), ranked.len());

        DayPlan { day, windows }
    }

    /// Plans every day of the week, Monday through Sunday.
    /// Days without common time and windows without a shared meeting
    /// point are kept in the plan, just empty.
    pub fn plan(&self) -> Plan {
        let ranked = self.ranked_points();

        if ranked.is_empty() {
            info!(
                "The {} participants share no meeting point",
                self.participants.len()
            );
        }

        #[cfg(feature = "rayon")]
        let days = Day::ALL[..]
            .par_iter()
            .map(|&day| self.plan_windows(day, &ranked))
            .collect::<Vec<_>>();

        #[cfg(not(feature = "rayon"))]
        let days = Day::ALL
            .iter()
            .map(|&day| self.plan_windows(day, &ranked))
            .collect::<Vec<_>>();

        Plan { days }
    }
}
