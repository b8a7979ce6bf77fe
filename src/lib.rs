//! Finds the windows of a week in which every participant is free and
//! lists the meeting points they all accept, with how far each of them
//! would have to travel.
//!
//! ```
//! use treffpunkt::{AvailabilityInterval, GeoPoint, Participant, Scheduler, SchedulerOptions};
//!
//! let cafe = GeoPoint::new("Cafe", 40.7128, -74.0060).unwrap();
//!
//! let mut alice = Participant::new("alice", cafe.clone());
//! alice.add_availability(AvailabilityInterval::parse("Monday", "10:00", "12:00", "America/New_York").unwrap());
//!
//! let mut bob = Participant::new("bob", GeoPoint::new("Brooklyn", 40.7306, -73.9352).unwrap());
//! bob.add_availability(AvailabilityInterval::parse("Monday", "11:00", "13:00", "America/New_York").unwrap());
//! bob.add_meeting_point(cafe);
//!
//! let plan = Scheduler::new(vec![alice, bob], SchedulerOptions::default()).unwrap().plan();
//! let suggestion = plan.suggestions().next().unwrap();
//!
//! assert_eq!(suggestion.window.to_string(), "Monday 11:00-12:00");
//! assert_eq!(suggestion.point.name(), "Cafe");
//! ```

pub mod availability;
pub mod clock;
pub mod error;
pub mod geo;
pub mod meeting;
pub mod options;
pub mod participant;
pub mod provider;
pub mod rank;
pub mod report;
pub mod schedule;
pub mod time;

pub use availability::AvailabilityInterval;
pub use clock::{Day, TimeOfDay};
pub use error::ValidationError;
pub use geo::{distance_km, GeoPoint};
pub use meeting::{common_windows, CommonWindow};
pub use options::SchedulerOptions;
pub use participant::Participant;
pub use provider::{CalendarFreeBusy, GeocodeResolver, LookupError, PlaceSearch};
pub use rank::{best_point, rank, Aggregate};
pub use schedule::{DayPlan, MeetingSuggestion, Plan, Scheduler, WindowPlan};
pub use time::TimeRange;
