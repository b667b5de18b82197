use crate::api::errors::{AnalysisError, Result};
use crate::structs::phase::Phase;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Resolves named experiment phases to time bounds.
pub trait TimelineSource {
    /// The `[start, end)` bounds of a single phase.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::DataAccess`] if the timeline has no such phase.
    fn time_bounds(&self, phase: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)>;

    /// Name of the phase containing `at`, used to label time axes.
    fn phase_label(&self, at: DateTime<Utc>) -> Option<&str>;

    /// Zone in which the timeline was written; day/night ticks are placed in it.
    fn time_zone(&self) -> Tz;

    /// Bounds spanning all of the given phases: earliest start to latest end.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Configuration`] if `phases` is empty,
    /// [`AnalysisError::DataAccess`] if any phase is unknown.
    fn time_bounds_all(&self, phases: &[String]) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let mut bounds: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
        for phase in phases {
            let (start, end) = self.time_bounds(phase)?;
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(start), max.max(end)),
                None => (start, end),
            });
        }

        bounds.ok_or_else(|| AnalysisError::Configuration("Phase list is empty".to_string()))
    }

    /// Resolves phase names into [`Phase`]s, preserving their order.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Configuration`] if `names` is empty,
    /// [`AnalysisError::DataAccess`] if any phase is unknown.
    fn phases(&self, names: &[String]) -> Result<Vec<Phase>> {
        if names.is_empty() {
            return Err(AnalysisError::Configuration(
                "Phase list is empty".to_string(),
            ));
        }

        names
            .iter()
            .map(|name| {
                let (start, end) = self.time_bounds(name)?;
                Ok(Phase::new(name.clone(), start, end))
            })
            .collect()
    }
}
