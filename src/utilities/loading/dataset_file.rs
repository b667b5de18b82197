use crate::api::errors::{AnalysisError, Result};
use crate::api::traits::dataset_source::{DatasetSource, Group, VisitFilter, VisitOrder};
use crate::structs::visit::{SubjectId, Visit};
use log::{info, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zstd::Decoder;

/// On-disk layout of a dataset.
#[derive(Debug, Default, Deserialize)]
pub struct DatasetFile {
    /// All recorded subjects. When empty, derived from the visits.
    #[serde(default)]
    pub subjects: Vec<SubjectId>,
    /// Group name to member subjects.
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<SubjectId>>,
    pub visits: Vec<Visit>,
}

/// A dataset held entirely in memory, visits sorted by start.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    subjects: Vec<SubjectId>,
    known_subjects: HashSet<SubjectId>,
    groups: BTreeMap<String, Group>,
    visits: Vec<Visit>,
}

impl InMemoryDataset {
    pub fn new(
        subjects: Vec<SubjectId>,
        groups: BTreeMap<String, Vec<SubjectId>>,
        mut visits: Vec<Visit>,
    ) -> Self {
        let subjects = if subjects.is_empty() {
            visits
                .iter()
                .map(|visit| visit.subject.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        } else {
            subjects
        };

        let known_subjects: HashSet<SubjectId> = subjects.iter().cloned().collect();
        for visit in visits.iter().filter(|v| !known_subjects.contains(&v.subject)) {
            warn!(
                "visit at {} belongs to unlisted subject '{}'",
                visit.start, visit.subject
            );
        }

        let groups = groups
            .into_iter()
            .map(|(name, members)| {
                let group = Group {
                    name: name.clone(),
                    members,
                };
                (name, group)
            })
            .collect();

        visits.sort_by_key(|visit| visit.start);

        Self {
            subjects,
            known_subjects,
            groups,
            visits,
        }
    }

    /// A dataset without groups whose subjects are those seen in `visits`.
    pub fn from_visits(visits: Vec<Visit>) -> Self {
        Self::new(Vec::new(), BTreeMap::new(), visits)
    }

    /// All visits, ordered by start.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }
}

impl From<DatasetFile> for InMemoryDataset {
    fn from(file: DatasetFile) -> Self {
        Self::new(file.subjects, file.groups, file.visits)
    }
}

impl DatasetSource for InMemoryDataset {
    fn subjects(&self) -> Vec<SubjectId> {
        self.subjects.clone()
    }

    fn get_visits(&self, filter: &VisitFilter) -> Result<Vec<&Visit>> {
        let wanted: Option<HashSet<&str>> = match &filter.subjects {
            Some(subjects) => {
                if let Some(unknown) = subjects.iter().find(|s| !self.known_subjects.contains(*s)) {
                    return Err(AnalysisError::DataAccess(format!(
                        "Unknown subject '{}'",
                        unknown
                    )));
                }
                Some(subjects.iter().map(String::as_str).collect())
            }
            None => None,
        };

        let mut visits: Vec<&Visit> = self
            .visits
            .iter()
            .filter(|visit| {
                wanted
                    .as_ref()
                    .map_or(true, |wanted| wanted.contains(visit.subject.as_str()))
            })
            .filter(|visit| filter.matches_time(visit))
            .collect();

        match filter.order_by {
            // Stored order.
            Some(VisitOrder::Start) | None => {}
            Some(VisitOrder::End) => visits.sort_by_key(|visit| visit.end),
        }

        Ok(visits)
    }

    fn get_group(&self, name: &str) -> Result<&Group> {
        self.groups
            .get(name)
            .ok_or_else(|| AnalysisError::Configuration(format!("Unknown group '{}'", name)))
    }
}

/// Loads a dataset from a `.json` or ZStandard compressed `.json.zst` file.
///
/// # Arguments
/// * `file_path` - Path to the dataset; a `zst` extension selects decompression
///
/// # Returns
/// * `Ok(InMemoryDataset)` - Successfully parsed dataset
/// * `Err(AnalysisError)` - If file reading, decompression, or JSON parsing failed
pub fn load_dataset(file_path: &Path) -> Result<InMemoryDataset> {
    let file = File::open(file_path)?;

    let is_compressed = file_path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("zst"));

    let dataset = if is_compressed {
        let decoder = Decoder::new(file).map_err(|e| {
            AnalysisError::Decompression(format!("Failed to create decoder: {}", e))
        })?;
        parse_dataset(decoder)?
    } else {
        parse_dataset(BufReader::new(file))?
    };

    info!(
        "loaded {} visits of {} subjects from {}",
        dataset.visits.len(),
        dataset.subjects.len(),
        file_path.display()
    );
    Ok(dataset)
}

/// Parses an uncompressed JSON dataset.
pub fn parse_dataset<R: Read>(reader: R) -> Result<InMemoryDataset> {
    let file: DatasetFile = serde_json::from_reader(reader)?;
    Ok(file.into())
}
