use crate::api::errors::Result;
use crate::structs::visit::{SubjectId, Visit};
use chrono::{DateTime, Utc};

/// Order in which [`DatasetSource::get_visits`] returns visits.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VisitOrder {
    Start,
    End,
}

/// Selects visits from a dataset.
///
/// A visit matches when its subject is listed (or no subjects are listed)
/// and its start lies within `[start, end)`. Missing bounds are open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitFilter {
    pub subjects: Option<Vec<SubjectId>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub order_by: Option<VisitOrder>,
}

impl VisitFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: impl Into<SubjectId>) -> Self {
        self.subjects
            .get_or_insert_with(Vec::new)
            .push(subject.into());
        self
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn order_by(mut self, order: VisitOrder) -> Self {
        self.order_by = Some(order);
        self
    }

    /// Checks the time bounds of this filter; subjects are resolved by the source.
    pub fn matches_time(&self, visit: &Visit) -> bool {
        self.start.map_or(true, |start| visit.start >= start)
            && self.end.map_or(true, |end| visit.start < end)
    }
}

/// A named set of subjects, e.g. a treatment condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub members: Vec<SubjectId>,
}

/// Read-only access to a loaded dataset of visits.
pub trait DatasetSource {
    /// All subjects recorded in the dataset.
    fn subjects(&self) -> Vec<SubjectId>;

    /// Returns the visits matching `filter`.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::DataAccess`] if the filter names a subject the dataset does not know.
    ///
    /// [`AnalysisError::DataAccess`]: crate::api::errors::AnalysisError::DataAccess
    fn get_visits(&self, filter: &VisitFilter) -> Result<Vec<&Visit>>;

    /// # Errors
    ///
    /// [`AnalysisError::Configuration`] if no group has this name.
    ///
    /// [`AnalysisError::Configuration`]: crate::api::errors::AnalysisError::Configuration
    fn get_group(&self, name: &str) -> Result<&Group>;
}
