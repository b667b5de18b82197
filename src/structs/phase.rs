use chrono::{DateTime, TimeDelta, Utc};
use derive_new::new;

/// A named, half-open experimental time window `[start, end)`.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Phase {
    /// Dark phases are shaded in the background of phase-aligned charts.
    pub fn is_dark(&self) -> bool {
        self.name.ends_with("dark")
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time < self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Where the phase's aggregate is drawn on a time axis.
    pub fn midpoint(&self) -> DateTime<Utc> {
        self.start + self.duration() / 2
    }
}
