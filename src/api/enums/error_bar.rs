use serde::{Deserialize, Serialize};

/// Z-score of the two-sided 95% confidence interval of a normal distribution.
pub const CI95_Z_SCORE: f64 = 1.96;

/// How error bars around a group mean are sized.
///
/// Both conventions are in use for near-identical figures; pick one and use
/// it for every series that is compared in a single figure.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorBar {
    /// Standard error of the mean.
    #[default]
    Sem,

    /// 95% confidence interval, `1.96 × SEM`.
    Ci95,
}

impl ErrorBar {
    /// Scales a standard error of the mean to this convention.
    pub fn from_sem(self, sem: f64) -> f64 {
        match self {
            ErrorBar::Sem => sem,
            ErrorBar::Ci95 => CI95_Z_SCORE * sem,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ErrorBar::Sem => "SEM",
            ErrorBar::Ci95 => "95% CI",
        }
    }
}
