use criterion::{black_box, criterion_group, criterion_main, Criterion};
use treffpunkt::{
    common_windows, distance_km, AvailabilityInterval, Day, GeoPoint, Participant, Scheduler,
    SchedulerOptions, TimeOfDay,
};

fn participants(count: usize) -> Vec<Participant> {
    (0..count)
        .map(|i| {
            let home = GeoPoint::new(
                &format!("Home {}", i),
                40.70 + i as f64 * 0.01,
                -74.00 + i as f64 * 0.01,
            )
            .unwrap();
            let mut participant = Participant::new(&i.to_string(), home);
            participant.add_meeting_point(GeoPoint::new("Library", 40.7306, -73.9352).unwrap());

            for day in Day::ALL.iter() {
                // Staggered blocks so every participant has several disjoint intervals per day
                for block in 0..6_u16 {
                    let start = 6 * 60 + block * 120 + (i as u16 % 4) * 10;
                    let interval = AvailabilityInterval::new(
                        *day,
                        TimeOfDay::from_minutes(start).unwrap(),
                        TimeOfDay::from_minutes(start + 90).unwrap(),
                        chrono_tz::UTC,
                    )
                    .unwrap();
                    participant.add_availability(interval);
                }
            }
            participant
        })
        .collect()
}

fn intersect_and_plan(c: &mut Criterion) {
    c.bench_function("haversine", |b| {
        let a = GeoPoint::new("a", 40.7128, -74.0060).unwrap();
        let z = GeoPoint::new("z", 40.7306, -73.9352).unwrap();

        b.iter(|| black_box(distance_km(black_box(&a), black_box(&z))))
    });

    c.bench_function("common_windows 10 participants", |b| {
        let participants = participants(10);

        b.iter(|| black_box(common_windows(&participants, Day::Wednesday)))
    });

    c.bench_function("common_windows 100 participants", |b| {
        let participants = participants(100);

        b.iter(|| black_box(common_windows(&participants, Day::Wednesday)))
    });

    c.bench_function("plan week", move |b| {
        let scheduler = Scheduler::new(participants(25), SchedulerOptions::default()).unwrap();

        b.iter(|| black_box(scheduler.plan()))
    });

    c.bench_function("normalize into reference zone", move |b| {
        let options = SchedulerOptions {
            reference_timezone: Some(chrono_tz::Europe::Berlin),
            ..SchedulerOptions::default()
        };
        let participants = participants(25);

        b.iter(|| black_box(Scheduler::new(participants.clone(), options.clone())))
    });
}

criterion_group!(benches, intersect_and_plan);
criterion_main!(benches);
