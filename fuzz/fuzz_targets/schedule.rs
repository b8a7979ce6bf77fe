#![no_main]
use libfuzzer_sys::fuzz_target;
use treffpunkt::{
    AvailabilityInterval, Day, GeoPoint, Participant, Scheduler, SchedulerOptions, TimeOfDay,
};

fuzz_target!(|data: Vec<Vec<(Day, u16, u16)>>| {
    // searching for windows nobody agreed to
    #[cfg(feature = "log")]
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply();

    let participants: Vec<Participant> = data
        .iter()
        .enumerate()
        .map(|(i, times)| {
            let home = GeoPoint::new(&i.to_string(), 0.0, 0.0).unwrap();
            let mut participant = Participant::new(&i.to_string(), home);
            for &(day, start, end) in times {
                let start = TimeOfDay::from_minutes(start % 1440).unwrap();
                let end = TimeOfDay::from_minutes(end % 1440).unwrap();
                if let Ok(interval) = AvailabilityInterval::new(day, start, end, chrono_tz::UTC) {
                    participant.add_availability(interval);
                }
            }
            participant
        })
        .collect();

    let scheduler = match Scheduler::new(participants, SchedulerOptions::default()) {
        Ok(scheduler) => scheduler,
        Err(_) => return,
    };
    let plan = scheduler.plan();

    assert_eq!(plan.days.len(), 7, "Every day must be reported");

    for window in plan.windows() {
        assert!(window.start < window.end, "Degenerate window {}", window);
        for participant in scheduler.participants() {
            assert!(
                participant
                    .day_ranges(window.day)
                    .iter()
                    .any(|r| r.start() <= window.start.minutes() && window.end.minutes() <= r.end()),
                "Window {} is outside the availability of ({})",
                window,
                participant.id()
            );
        }
    }
});
