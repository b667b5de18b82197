//! First nosepoke sides of a single subject

use crate::common::tables::{format_table, SideRow};
use crate::errors::Result;
use intellicage_performance::prelude::*;
use std::fs;
use std::path::Path;

/// Counts the first nosepoke sides of every visit of `subject`, in or out of the configured phases
pub fn subject_side_counts(
    dataset: &InMemoryDataset,
    subject: &str,
) -> core::result::Result<SideCounts, AnalysisError> {
    let visits = dataset.get_visits(&VisitFilter::new().subject(subject))?;
    Ok(count_first_nosepoke_sides(&visits))
}

pub fn side_rows(counts: &SideCounts) -> Vec<SideRow> {
    vec![
        SideRow::new("left", counts.left, counts.total()),
        SideRow::new("right", counts.right, counts.total()),
    ]
}

/// Reports which door received the first nosepoke of each of a subject's visits
///
/// # Arguments
/// * `dataset` - Loaded visits
/// * `subject` - The subject to count
/// * `output_dir` - Receives `side_counts.txt`
pub fn generate_side_count_analysis(
    dataset: &InMemoryDataset,
    subject: &str,
    output_dir: &Path,
) -> Result<()> {
    let counts = subject_side_counts(dataset, subject)?;

    let title = format!("First nosepoke sides of {}", subject);
    let table = format_table(&side_rows(&counts), Some(title.as_str()));
    println!("{}", table);
    fs::write(output_dir.join("side_counts.txt"), table)?;

    Ok(())
}
