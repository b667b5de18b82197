//! Analyses run by the tool
//!
//! This module contains the analysis logic for:
//! - Group performance curves over the configured phases
//! - Intervisit interval histograms of a single phase
//! - First nosepoke side counts of a single subject

pub mod intervals;
pub mod performance;
pub mod side_counts;

#[cfg(test)]
pub mod test_data;

// Re-export analysis functions for convenience
pub use intervals::generate_interval_analysis;
pub use performance::generate_performance_analysis;
pub use side_counts::generate_side_count_analysis;

use crate::errors::Result;
use intellicage_performance::prelude::*;
use std::path::Path;

/// Resolves every group, phase and subject the configuration names
///
/// # Returns
/// * `Ok(())` - If all of them exist in the dataset and timeline
/// * `Err(AnalysisError)` - For the first one that does not
pub fn check_references(
    config: &AnalysisConfig,
    dataset: &InMemoryDataset,
    timeline: &IniTimeline,
) -> core::result::Result<(), AnalysisError> {
    timeline.phases(&config.phase_names)?;
    for group in &config.groups {
        dataset.get_group(group)?;
    }

    if let Some(phase) = &config.histogram_phase {
        timeline.time_bounds(phase)?;
    }

    if let Some(subject) = &config.side_count_subject {
        dataset.get_visits(&VisitFilter::new().subject(subject.as_str()))?;
    }

    Ok(())
}

/// Runs every configured analysis, writing their output to `output_dir`
///
/// Nothing is computed or written unless every name in `config` resolves.
pub fn run_analyses(
    config: &AnalysisConfig,
    dataset: &InMemoryDataset,
    timeline: &IniTimeline,
    output_dir: &Path,
) -> Result<()> {
    check_references(config, dataset, timeline)?;

    println!("\n📈 Performance curves");
    generate_performance_analysis(config, dataset, timeline, output_dir)?;

    if let Some(phase) = &config.histogram_phase {
        println!("\n📊 Intervisit intervals in '{}'", phase);
        generate_interval_analysis(config, dataset, timeline, phase, output_dir)?;
    }

    if let Some(subject) = &config.side_count_subject {
        println!("\n🐭 First nosepoke sides of '{}'", subject);
        generate_side_count_analysis(dataset, subject, output_dir)?;
    }

    Ok(())
}
