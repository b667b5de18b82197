//! Per-subject, per-phase performance.
//!
//! Performance in a phase is the fraction of successes among the visits
//! that qualify for that phase. A subject without qualifying visits has an
//! undefined performance ([`None`]), which is kept apart from a performance
//! of zero all the way through to the group summaries.

use crate::api::enums::performance_measure::PerformanceMeasure;
use crate::api::errors::{AnalysisError, Result};
use crate::api::traits::dataset_source::{DatasetSource, VisitFilter};
use crate::structs::performance_matrix::PerformanceMatrix;
use crate::structs::phase::Phase;
use crate::structs::visit::{Nosepoke, SubjectId, Visit};
use crate::utilities::maybe_sync::MaybeSync;
use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Decides whether an eligible visit is a success.
pub trait SuccessCriterion {
    /// Judges a single eligible visit.
    ///
    /// Returns [`None`] if the visit cannot be judged; such visits do not
    /// count towards the denominator.
    fn judge(&self, visit: &Visit) -> Option<bool>;
}

/// Judges the visit as a whole.
pub struct VisitSuccess<F>(pub F);

impl<F> SuccessCriterion for VisitSuccess<F>
where
    F: Fn(&Visit) -> bool,
{
    fn judge(&self, visit: &Visit) -> Option<bool> {
        Some((self.0)(visit))
    }
}

/// Judges the first nosepoke of the visit.
///
/// Visits without nosepokes are left out of the ratio entirely, they are
/// neither successes nor failures.
pub struct FirstNosepokeSuccess<F>(pub F);

impl<F> SuccessCriterion for FirstNosepokeSuccess<F>
where
    F: Fn(&Nosepoke) -> bool,
{
    fn judge(&self, visit: &Visit) -> Option<bool> {
        visit.first_nosepoke().map(|nosepoke| (self.0)(nosepoke))
    }
}

/// Computes the performance of every subject in every phase.
///
/// Rows of the result follow `subjects`, columns follow `phases`.
///
/// # Arguments
/// * `dataset` - Source of the visits
/// * `subjects` - Subjects to compute, one row each
/// * `phases` - Phases to compute, one column each
/// * `eligibility` - Whether a visit counts towards the denominator
/// * `success` - Whether an eligible visit counts towards the numerator
///
/// # Errors
/// * [`AnalysisError::Configuration`] - If `subjects` or `phases` is empty
/// * [`AnalysisError::DataAccess`] - If the dataset cannot resolve a subject
pub fn compute_matrix<D, E, S>(
    dataset: &D,
    subjects: &[SubjectId],
    phases: &[Phase],
    eligibility: E,
    success: S,
) -> Result<PerformanceMatrix>
where
    D: DatasetSource + MaybeSync + ?Sized,
    E: Fn(&Visit) -> bool + MaybeSync,
    S: SuccessCriterion + MaybeSync,
{
    if phases.is_empty() {
        return Err(AnalysisError::Configuration(
            "Phase list is empty".to_string(),
        ));
    }

    if subjects.is_empty() {
        return Err(AnalysisError::Configuration(
            "Subject list is empty".to_string(),
        ));
    }

    #[cfg(feature = "parallel")]
    let rows = subjects
        .par_iter()
        .map(|subject| performance_curve(dataset, subject, phases, &eligibility, &success))
        .collect::<Result<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let rows = subjects
        .iter()
        .map(|subject| performance_curve(dataset, subject, phases, &eligibility, &success))
        .collect::<Result<Vec<_>>>()?;

    let phase_names = phases.iter().map(|phase| phase.name.clone()).collect();
    Ok(PerformanceMatrix::from_rows(
        subjects.to_vec(),
        phase_names,
        rows,
    ))
}

/// Computes a matrix for one of the predefined measures.
pub fn measure_matrix<D>(
    dataset: &D,
    subjects: &[SubjectId],
    phases: &[Phase],
    measure: PerformanceMeasure,
) -> Result<PerformanceMatrix>
where
    D: DatasetSource + MaybeSync + ?Sized,
{
    match measure {
        PerformanceMeasure::CornerPreference => compute_matrix(
            dataset,
            subjects,
            phases,
            |_: &Visit| true,
            VisitSuccess(Visit::is_to_correct_corner),
        ),
        PerformanceMeasure::FirstNosepokeSide => compute_matrix(
            dataset,
            subjects,
            phases,
            Visit::is_to_correct_corner,
            FirstNosepokeSuccess(Nosepoke::is_to_correct_side),
        ),
    }
}

/// Computes a matrix for the members of a named group.
///
/// # Errors
/// * [`AnalysisError::Configuration`] - If the group is unknown
pub fn group_matrix<D>(
    dataset: &D,
    group: &str,
    phases: &[Phase],
    measure: PerformanceMeasure,
) -> Result<PerformanceMatrix>
where
    D: DatasetSource + MaybeSync + ?Sized,
{
    let members = dataset.get_group(group)?.members.clone();
    measure_matrix(dataset, &members, phases, measure)
}

/// The performance of one subject in each of `phases`, in order.
pub fn performance_curve<D, E, S>(
    dataset: &D,
    subject: &SubjectId,
    phases: &[Phase],
    eligibility: &E,
    success: &S,
) -> Result<Vec<Option<f64>>>
where
    D: DatasetSource + ?Sized,
    E: Fn(&Visit) -> bool,
    S: SuccessCriterion,
{
    phases
        .iter()
        .map(|phase| performance(dataset, subject, phase, eligibility, success))
        .collect()
}

/// The performance of one subject in one phase.
pub fn performance<D, E, S>(
    dataset: &D,
    subject: &SubjectId,
    phase: &Phase,
    eligibility: &E,
    success: &S,
) -> Result<Option<f64>>
where
    D: DatasetSource + ?Sized,
    E: Fn(&Visit) -> bool,
    S: SuccessCriterion,
{
    let filter = VisitFilter::new()
        .subject(subject.as_str())
        .between(phase.start, phase.end);
    let visits = dataset.get_visits(&filter)?;

    let outcomes = visits
        .into_iter()
        .filter(|visit| eligibility(*visit))
        .filter_map(|visit| success.judge(visit));
    let ratio = success_ratio(outcomes);

    debug!("performance of {} in '{}': {:?}", subject, phase.name, ratio);
    Ok(ratio)
}

/// Fraction of `true` outcomes, [`None`] when there are no outcomes at all.
pub fn success_ratio(outcomes: impl IntoIterator<Item = bool>) -> Option<f64> {
    let (successes, total) = outcomes
        .into_iter()
        .fold((0usize, 0usize), |(successes, total), outcome| {
            (successes + outcome as usize, total + 1)
        });

    if total == 0 {
        None
    } else {
        Some(successes as f64 / total as f64)
    }
}
