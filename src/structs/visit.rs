use chrono::{DateTime, TimeDelta, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Identifies a single animal.
pub type SubjectId = String;

/// Feeder door within a corner.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Door {
    Left,
    Right,
}

/// A single poke into a feeder door during a visit.
#[derive(new, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nosepoke {
    pub door: Door,
    /// Positive when the door is the correct side under the current condition.
    pub side_condition: i32,
}

impl Nosepoke {
    pub fn is_to_correct_side(&self) -> bool {
        self.side_condition > 0
    }
}

/// One recorded approach of a subject to a feeding corner.
///
/// Visits of a single subject never overlap and are chronologically ordered.
#[derive(new, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub subject: SubjectId,
    pub cage: u32,
    pub corner: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Positive when the corner is the rewarded corner for the subject.
    pub corner_condition: i32,
    /// In the order they were recorded.
    #[serde(default)]
    pub nosepokes: Vec<Nosepoke>,
}

impl Visit {
    pub fn is_to_correct_corner(&self) -> bool {
        self.corner_condition > 0
    }

    /// The nosepoke that determines the decision made during this visit.
    pub fn first_nosepoke(&self) -> Option<&Nosepoke> {
        self.nosepokes.first()
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}
