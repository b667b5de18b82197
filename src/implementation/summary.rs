use crate::api::enums::error_bar::ErrorBar;
use crate::api::errors::{AnalysisError, Result};
use crate::structs::performance_matrix::PerformanceMatrix;
use crate::structs::phase::Phase;
use crate::utilities::math::{masked_mean, masked_sem};
use chrono::{DateTime, Utc};

/// Mean and error of a group's performance, one entry per phase.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    /// [`None`] where no subject had a defined performance.
    pub mean: Vec<Option<f64>>,
    /// [`None`] where fewer than two subjects had a defined performance.
    pub error: Vec<Option<f64>>,
    pub error_bar: ErrorBar,
}

/// A phase's aggregate placed on the time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryPoint {
    pub midpoint: DateTime<Utc>,
    pub mean: Option<f64>,
    pub error: Option<f64>,
}

/// Reduces a matrix across subjects, ignoring undefined cells.
pub fn summarize(matrix: &PerformanceMatrix, error_bar: ErrorBar) -> GroupSummary {
    let (mean, error): (Vec<_>, Vec<_>) = (0..matrix.num_phases())
        .filter_map(|phase| matrix.column(phase))
        .map(|column| {
            let mean = masked_mean(column.clone());
            let error = masked_sem(column).map(|sem| error_bar.from_sem(sem));
            (mean, error)
        })
        .unzip();

    GroupSummary {
        mean,
        error,
        error_bar,
    }
}

impl GroupSummary {
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Pairs every column with the midpoint of its phase.
    ///
    /// # Errors
    /// * [`AnalysisError::Configuration`] - If the number of phases differs from the number of columns
    pub fn points(&self, phases: &[Phase]) -> Result<Vec<SummaryPoint>> {
        if phases.len() != self.len() {
            return Err(AnalysisError::Configuration(format!(
                "{} phases given for a summary of {} phases",
                phases.len(),
                self.len()
            )));
        }

        Ok(phases
            .iter()
            .zip(self.mean.iter().zip(&self.error))
            .map(|(phase, (&mean, &error))| SummaryPoint {
                midpoint: phase.midpoint(),
                mean,
                error,
            })
            .collect())
    }
}
