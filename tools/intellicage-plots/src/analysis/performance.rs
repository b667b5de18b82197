//! Group performance curves over the configured phases

use crate::common::plots::{create_performance_plot, CurveSeries};
use crate::common::tables::{format_table, SummaryRow};
use crate::errors::Result;
use intellicage_performance::prelude::*;
use log::info;
use plotters::style::RGBColor;
use std::fs;
use std::path::Path;

/// The performance of one series, per subject and summarized
#[derive(Debug, Clone)]
pub struct GroupCurve {
    /// Group name, [`None`] for the series of all subjects.
    pub name: Option<String>,
    pub color: RGBColor,
    pub matrix: PerformanceMatrix,
    pub summary: GroupSummary,
}

/// Computes one curve per configured group, or a single curve of all subjects
///
/// # Arguments
/// * `config` - Selects the groups, their colours, the measure and the error bar
/// * `dataset` - Source of the visits and group memberships
/// * `phases` - Phases to compute the performance in, in order
///
/// # Returns
/// * `Ok(Vec<GroupCurve>)` - The curves in configuration order
/// * `Err(AnalysisError)` - If a group is unknown or has no colour
pub fn build_group_curves(
    config: &AnalysisConfig,
    dataset: &InMemoryDataset,
    phases: &[Phase],
) -> core::result::Result<Vec<GroupCurve>, AnalysisError> {
    if config.groups.is_empty() {
        let matrix = measure_matrix(dataset, &dataset.subjects(), phases, config.measure)?;
        let (r, g, b) = parse_hex_color(DEFAULT_SERIES_COLOR)?;
        let summary = summarize(&matrix, config.error_bar);
        return Ok(vec![GroupCurve {
            name: None,
            color: RGBColor(r, g, b),
            matrix,
            summary,
        }]);
    }

    config
        .groups
        .iter()
        .map(|group| {
            let matrix = group_matrix(dataset, group, phases, config.measure)?;
            let (r, g, b) = config.group_color(group)?;
            let summary = summarize(&matrix, config.error_bar);
            Ok(GroupCurve {
                name: Some(group.clone()),
                color: RGBColor(r, g, b),
                matrix,
                summary,
            })
        })
        .collect()
}

/// One table row per (curve, phase)
pub fn summary_rows(curves: &[GroupCurve], phases: &[Phase]) -> Vec<SummaryRow> {
    curves
        .iter()
        .flat_map(|curve| {
            let group = curve.name.as_deref().unwrap_or("all subjects");
            phases
                .iter()
                .zip(curve.summary.mean.iter().zip(&curve.summary.error))
                .map(move |(phase, (&mean, &error))| SummaryRow::new(group, &phase.name, mean, error))
        })
        .collect()
}

/// Plots the performance curves of all configured groups and writes a summary table
///
/// # Arguments
/// * `config` - The run configuration
/// * `dataset` - Loaded visits
/// * `timeline` - Loaded phases
/// * `output_dir` - Receives `performance.png` and `performance_summary.txt`
pub fn generate_performance_analysis(
    config: &AnalysisConfig,
    dataset: &InMemoryDataset,
    timeline: &IniTimeline,
    output_dir: &Path,
) -> Result<()> {
    let phases = timeline.phases(&config.phase_names)?;
    let curves = build_group_curves(config, dataset, &phases)?;
    for curve in &curves {
        info!(
            "{}: {} subjects over {} phases",
            curve.name.as_deref().unwrap_or("all subjects"),
            curve.matrix.num_subjects(),
            curve.matrix.num_phases()
        );
    }

    let title = format!(
        "{} (mean ± {})",
        config.measure.axis_label(),
        config.error_bar.label()
    );
    let table = format_table(&summary_rows(&curves, &phases), Some(title.as_str()));
    println!("{}", table);
    fs::write(output_dir.join("performance_summary.txt"), table)?;

    let series = curves
        .iter()
        .map(|curve| {
            Ok(CurveSeries {
                label: curve.name.clone(),
                color: curve.color,
                points: curve.summary.points(&phases)?,
            })
        })
        .collect::<core::result::Result<Vec<_>, AnalysisError>>()?;

    let output_path = output_dir.join("performance.png");
    create_performance_plot(
        &series,
        &phases,
        timeline,
        config.measure,
        config.title.as_deref().unwrap_or(&title),
        &output_path,
    )?;

    println!("✅ Performance plot written to {}", output_path.display());
    Ok(())
}
