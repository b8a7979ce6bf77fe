use itertools::Itertools;
use log::trace;
use num::Integer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Half open [start, end) time range
/// <N>: Any ordered point in time (minutes of the day, datetimes, ...)
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeRange<N>(pub N, pub N)
where
    N: Ord + Copy;

impl<N> TimeRange<N>
where
    N: Ord + Copy,
{
    /// Construct a new Time Range
    /// Range is half open on [start, end)
    /// # Examples
    /// ```
    /// use treffpunkt::time::TimeRange;
    ///
    /// let test = TimeRange::new(0, 100);
    ///
    /// assert_eq!(test.0, 0);
    /// assert_eq!(test.1, 100);
    /// ```
    pub fn new(start: N, end: N) -> TimeRange<N> {
        TimeRange(start, end)
    }

    /// Convenience function for readability
    /// Returns the start of the TimeRange
    pub fn start(self) -> N {
        self.0
    }

    /// Convenience function for readability
    /// Returns the end of the TimeRange
    pub fn end(self) -> N {
        self.1
    }

    /// A range that covers no instant at all
    pub fn is_empty(self) -> bool {
        self.0 >= self.1
    }

    /// The overlap primitive everything else in this module builds on.
    /// Ranges only overlap when `max(start) < min(end)`, touching ends do not count.
    ///
    /// # Examples
    /// ```
    /// use treffpunkt::time::TimeRange;
    ///
    /// let a = TimeRange::new(600, 720);
    /// let b = TimeRange::new(660, 780);
    /// assert_eq!(a.overlap(&b), Some(TimeRange::new(660, 720)));
    ///
    /// let c = TimeRange::new(720, 780);
    /// assert_eq!(a.overlap(&c), None);
    /// ```
    pub fn overlap(&self, other: &TimeRange<N>) -> Option<TimeRange<N>> {
        let start = self.start().max(other.start());
        let end = self.end().min(other.end());

        if start < end {
            Some(TimeRange(start, end))
        } else {
            None
        }
    }
}

impl<N> TimeRange<N>
where
    N: Ord + Copy + Integer,
{
    /// Length of the range in the unit of `N`
    pub fn len(self) -> N {
        if self.is_empty() {
            N::zero()
        } else {
            self.1 - self.0
        }
    }
}

pub trait TimeMerge<N>
where
    N: Ord + Copy,
{
    fn time_merge(self) -> Vec<TimeRange<N>>;
}

impl<'a, T, N> TimeMerge<N> for T
where
    T: Iterator<Item = &'a TimeRange<N>>,
    N: 'a + Ord + Copy,
{
    /// Sorts and combines overlapping or touching TimeRanges together.
    /// Empty ranges are discarded.
    ///
    /// # Examples
    /// ```
    /// use treffpunkt::time::{TimeMerge, TimeRange};
    ///
    /// let time_merge = vec![
    ///     TimeRange::new(6, 7),
    ///     TimeRange::new(0, 1),
    ///     TimeRange::new(1, 3),
    ///     TimeRange::new(2, 4),
    ///     TimeRange::new(5, 5),
    /// ];
    ///
    /// assert_eq!(
    ///     time_merge.iter().time_merge(),
    ///     vec![TimeRange::new(0, 4), TimeRange::new(6, 7)]
    /// );
    /// ```
    fn time_merge(self) -> Vec<TimeRange<N>> {
        let (last, mut acc) = self
            .filter(|time| !time.is_empty())
            .sorted()
            .fold(
                (None, Vec::new()),
                |(last, mut acc): (Option<TimeRange<N>>, Vec<TimeRange<N>>), &curr| match last {
                    None => (Some(curr), acc),
                    Some(time) if curr.start() <= time.end() => (
                        Some(TimeRange::new(time.start(), time.end().max(curr.end()))),
                        acc,
                    ),
                    Some(time) => {
                        acc.push(time);
                        (Some(curr), acc)
                    }
                },
            );

        if let Some(time) = last {
            acc.push(time);
        }

        acc
    }
}

pub trait Intersect<N>
where
    N: Ord + Copy,
{
    fn intersect(self, other: &[TimeRange<N>]) -> Vec<TimeRange<N>>;
}

impl<'a, T, N> Intersect<N> for T
where
    T: Iterator<Item = &'a TimeRange<N>>,
    N: 'a + Ord + Copy + Debug,
{
    /// Two pointer sweep over two sorted, disjoint lists of TimeRanges.
    /// Every range of `self` is checked against all ranges of `other` that
    /// could reach it, so a miss against one range never discards it early.
    ///
    /// Both inputs are expected in the shape `time_merge` produces.
    ///
    /// # Examples
    /// ```
    /// use treffpunkt::time::{Intersect, TimeRange};
    ///
    /// let a = vec![TimeRange::new(540, 600), TimeRange::new(780, 840)];
    /// let b = vec![TimeRange::new(810, 900)];
    ///
    /// assert_eq!(a.iter().intersect(&b), vec![TimeRange::new(810, 840)]);
    /// ```
    fn intersect(self, other: &[TimeRange<N>]) -> Vec<TimeRange<N>> {
        let mut others = other.iter().peekable();
        let mut common = Vec::new();

        for current in self {
            while let Some(&candidate) = others.peek() {
                if let Some(overlap) = current.overlap(candidate) {
                    trace!("{:?} overlaps {:?} on {:?}", current, candidate, overlap);
                    common.push(overlap);
                }

                // A candidate ending after `current` may still reach the next range of `self`
                if candidate.end() <= current.end() {
                    others.next();
                } else {
                    break;
                }
            }
        }

        common
    }
}

pub trait Available<N>
where
    N: Ord + Copy,
{
    fn get_availability(self, available_times: &[TimeRange<N>]) -> Vec<TimeRange<N>>;
}

impl<'a, T, N> Available<N> for T
where
    T: Iterator<Item = &'a TimeRange<N>>,
    N: 'a + Ord + Copy,
{
    /// Self is blocked times that cannot be scheduled
    /// This performs a type of Set Exclusion of available times
    /// and self. `available_times - self`
    ///
    /// # Examples
    ///
    /// ```
    /// use treffpunkt::time::{Available, TimeRange};
    ///
    /// let blocked_times = vec![TimeRange::new(1, 2), TimeRange::new(5, 7)];
    /// let available_times = vec![TimeRange::new(0, 6)];
    ///
    /// assert_eq!(
    ///     blocked_times.iter().get_availability(&available_times),
    ///     vec![TimeRange::new(0, 1), TimeRange::new(2, 5)]
    /// );
    /// ```
    fn get_availability(self, available_times: &[TimeRange<N>]) -> Vec<TimeRange<N>> {
        let blocked = self.time_merge();

        available_times
            .iter()
            .time_merge()
            .into_iter()
            .flat_map(|available_time| {
                let mut start = available_time.start();
                let mut sub_times = vec![];

                for block in blocked.iter() {
                    if let Some(hit) = available_time.overlap(block) {
                        if hit.start() > start {
                            sub_times.push(TimeRange(start, hit.start()));
                        }
                        start = start.max(hit.end());
                    }
                }

                if start < available_time.end() {
                    sub_times.push(TimeRange(start, available_time.end()));
                }

                sub_times
            })
            .collect_vec()
    }
}

#[cfg(feature = "arbitrary")]
impl<'a, N> arbitrary::Arbitrary<'a> for TimeRange<N>
where
    N: Ord + Copy + arbitrary::Arbitrary<'a>,
{
    /// Always yields `start <= end`; empty ranges are possible
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let a = u.arbitrary::<N>()?;
        let b = u.arbitrary::<N>()?;
        Ok(TimeRange::new(a.min(b), a.max(b)))
    }
}
