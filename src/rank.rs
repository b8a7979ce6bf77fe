use crate::error::ValidationError;
use crate::geo::{distance_km, GeoPoint};
use crate::participant::Participant;
use crate::schedule::MeetingSuggestion;
use core::str::FromStr;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Distance in kilometers from each participant's home to `point`, keyed by participant id
pub fn rank(point: &GeoPoint, participants: &[Participant]) -> BTreeMap<String, f64> {
    participants
        .iter()
        .map(|participant| {
            (
                participant.id().to_string(),
                distance_km(participant.home(), point),
            )
        })
        .collect()
}

/// Distance between the homes of every pair of participants, `(i, j)` with `i < j`
pub fn pairwise_distances(participants: &[Participant]) -> Vec<(String, String, f64)> {
    participants
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            participants[i + 1..].iter().map(move |b| {
                (
                    a.id().to_string(),
                    b.id().to_string(),
                    distance_km(a.home(), b.home()),
                )
            })
        })
        .collect()
}

/// How the per-participant distances of a point are folded into one score
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Aggregate {
    /// Total distance travelled by everyone
    #[default]
    Sum,
    /// Distance travelled by whoever is furthest away
    Max,
}

impl Aggregate {
    pub fn score(self, distances: &BTreeMap<String, f64>) -> f64 {
        match self {
            Aggregate::Sum => distances.values().sum(),
            Aggregate::Max => distances.values().copied().fold(0.0, f64::max),
        }
    }
}

impl FromStr for Aggregate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Aggregate::Sum),
            "max" => Ok(Aggregate::Max),
            _ => Err(ValidationError::InvalidOption {
                key: "aggregate".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// The suggestion with the lowest `aggregate` score.
/// Equal scores are settled by point name, then latitude, then longitude.
pub fn best_point(
    suggestions: &[MeetingSuggestion],
    aggregate: Aggregate,
) -> Option<&MeetingSuggestion> {
    suggestions.iter().min_by(|a, b| {
        aggregate
            .score(&a.distances_km)
            .total_cmp(&aggregate.score(&b.distances_km))
            .then_with(|| compare_points(&a.point, &b.point))
    })
}

fn compare_points(a: &GeoPoint, b: &GeoPoint) -> Ordering {
    a.name()
        .cmp(b.name())
        .then_with(|| a.latitude().total_cmp(&b.latitude()))
        .then_with(|| a.longitude().total_cmp(&b.longitude()))
}
