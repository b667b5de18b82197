use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use intellicage_performance::prelude::*;

pub const PHASE_HOURS: i64 = 12;

fn experiment_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 7, 20, 17, 0, 0).unwrap()
}

/// `phase_count` back to back twelve hour phases, alternating dark and light.
pub fn generate_phases(phase_count: usize) -> Vec<Phase> {
    (0..phase_count)
        .map(|index| {
            let start = experiment_start() + TimeDelta::hours(PHASE_HOURS * index as i64);
            let kind = if index % 2 == 0 { "dark" } else { "light" };
            Phase::new(
                format!("DAY {} {}", index / 2 + 1, kind),
                start,
                start + TimeDelta::hours(PHASE_HOURS),
            )
        })
        .collect()
}

/// Every subject visits a corner every `spacing_seconds`, cycling through the four corners.
pub fn generate_dataset(
    subject_count: usize,
    phase_count: usize,
    spacing_seconds: i64,
) -> InMemoryDataset {
    let span = PHASE_HOURS * 3600 * phase_count as i64;
    let visits = (0..subject_count)
        .flat_map(|subject| {
            (0..span / spacing_seconds).map(move |index| {
                let start = experiment_start()
                    + TimeDelta::seconds(index * spacing_seconds + subject as i64);
                let corner = (index as usize + subject) % 4 + 1;
                let door = if index % 3 == 0 { Door::Right } else { Door::Left };
                Visit::new(
                    format!("mouse {}", subject),
                    subject as u32 % 2 + 1,
                    corner as u32,
                    start,
                    start + TimeDelta::seconds(5),
                    if corner == 1 { 1 } else { -1 },
                    vec![Nosepoke::new(door, if door == Door::Left { 1 } else { -1 })],
                )
            })
        })
        .collect();

    InMemoryDataset::from_visits(visits)
}
