//! A two-day experiment shared by the analysis tests.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use intellicage_performance::prelude::*;
use std::collections::BTreeMap;

pub const TIMELINE: &str = "\
[DEFAULT]
tzinfo = UTC

[PP dark]
start = 2012-08-31 19:00
end = 2012-09-01 07:00

[PP light]
start = 2012-09-01 07:00
end = 2012-09-01 19:00
";

pub fn at(hours: i64, seconds: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2012, 8, 31, 19, 0, 0).unwrap()
        + TimeDelta::hours(hours)
        + TimeDelta::seconds(seconds)
}

/// A ten second visit; `correct` selects the rewarded corner 1 over corner 2.
pub fn visit(subject: &str, hours: i64, seconds: i64, correct: bool, first_left: bool) -> Visit {
    let door = if first_left { Door::Left } else { Door::Right };
    Visit::new(
        subject.to_string(),
        1,
        if correct { 1 } else { 2 },
        at(hours, seconds),
        at(hours, seconds + 10),
        if correct { 1 } else { -1 },
        vec![Nosepoke::new(door, if first_left { 1 } else { -1 })],
    )
}

/// Groups `left` = [A, B] and `right` = [C].
///
/// Corner preference in `PP dark`: A 1/2, B 1/1, C 0/1; in `PP light`: A 1/1, B none, C 1/2.
pub fn dataset() -> InMemoryDataset {
    let visits = vec![
        visit("A", 1, 0, true, true),
        visit("A", 1, 30, false, false),
        visit("B", 2, 0, true, false),
        visit("C", 3, 0, false, true),
        visit("A", 13, 0, true, true),
        visit("C", 14, 0, true, true),
        visit("C", 14, 100, false, true),
    ];

    let mut groups = BTreeMap::new();
    groups.insert("left".to_string(), vec!["A".to_string(), "B".to_string()]);
    groups.insert("right".to_string(), vec!["C".to_string()]);
    InMemoryDataset::new(Vec::new(), groups, visits)
}

pub fn timeline() -> IniTimeline {
    IniTimeline::parse(TIMELINE).unwrap()
}

pub fn config(groups: &[&str]) -> AnalysisConfig {
    AnalysisConfig {
        dataset_path: "dataset.json".into(),
        timeline_path: "timeline.ini".into(),
        phase_names: vec!["PP dark".to_string(), "PP light".to_string()],
        groups: groups.iter().map(|group| group.to_string()).collect(),
        group_colors: groups
            .iter()
            .map(|group| (group.to_string(), "#ff0000".to_string()))
            .collect(),
        measure: PerformanceMeasure::CornerPreference,
        error_bar: ErrorBar::Sem,
        title: None,
        histogram_phase: Some("PP dark".to_string()),
        cages: 1,
        corners: 2,
        side_count_subject: Some("C".to_string()),
    }
}
