use serde::{Deserialize, Serialize};

/// What counts as a correct response when computing performance curves.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceMeasure {
    /// Every visit counts; a visit to the rewarded corner is a success.
    #[default]
    CornerPreference,

    /// Only visits to the rewarded corner count, and only those with a nosepoke.
    /// A first nosepoke to the correct side is a success.
    FirstNosepokeSide,
}

impl PerformanceMeasure {
    /// Label of the percentage axis.
    pub fn axis_label(self) -> &'static str {
        match self {
            PerformanceMeasure::CornerPreference => "% of visits to sugar corner",
            PerformanceMeasure::FirstNosepokeSide => "% of correct responses",
        }
    }

    /// Upper end of the percentage axis; ticks are placed every 10%.
    pub fn axis_max_percent(self) -> u32 {
        match self {
            PerformanceMeasure::CornerPreference => 70,
            PerformanceMeasure::FirstNosepokeSide => 100,
        }
    }
}
