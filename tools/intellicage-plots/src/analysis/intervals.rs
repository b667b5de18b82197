//! Intervisit interval histograms of a single phase

use crate::common::plots::{create_interval_grid_plot, HistogramPanel};
use crate::common::tables::{format_table, BinRow};
use crate::errors::Result;
use intellicage_performance::prelude::*;
use log::warn;
use std::fs;
use std::path::Path;

/// Bins the intervals between consecutive visits of every (cage, corner) pair
///
/// # Arguments
/// * `visits` - Visits of all subjects, ordered by start
/// * `cages` - Cages are numbered from 1 to `cages`
/// * `corners` - Corners are numbered from 1 to `corners`
/// * `bins` - Bins to count the intervals in
///
/// # Returns
/// One panel per pair, corner-major. Intervals that are not positive fall
/// outside every bin; they are reported and left uncounted.
pub fn build_histogram_panels(
    visits: &[&Visit],
    cages: u32,
    corners: u32,
    bins: &LogBins,
) -> Vec<HistogramPanel> {
    (1..=corners)
        .flat_map(|corner| (1..=cages).map(move |cage| (cage, corner)))
        .map(|(cage, corner)| {
            let selected = select_corner(visits, cage, corner);
            let seconds = to_seconds(intervisit_intervals(&selected));

            let non_positive = seconds.iter().filter(|&&interval| interval <= 0.0).count();
            if non_positive > 0 {
                warn!(
                    "cage #{} corner #{}: {} of {} intervals are not positive",
                    cage,
                    corner,
                    non_positive,
                    seconds.len()
                );
            }

            HistogramPanel {
                cage,
                corner,
                counts: bins.histogram(seconds),
            }
        })
        .collect()
}

/// One table row per non-empty bin
pub fn bin_rows(panels: &[HistogramPanel], bins: &LogBins) -> Vec<BinRow> {
    panels
        .iter()
        .flat_map(|panel| {
            bins.ranges()
                .zip(&panel.counts)
                .filter(|&(_, &count)| count > 0)
                .map(move |(range, &count)| BinRow::new(panel.cage, panel.corner, range, count))
        })
        .collect()
}

/// Plots the intervisit interval histograms of one phase and writes their bin counts
///
/// # Arguments
/// * `config` - Provides the cage and corner counts
/// * `dataset` - Loaded visits
/// * `timeline` - Resolves `phase`
/// * `phase` - Only visits starting in this phase are used
/// * `output_dir` - Receives `intervisit_histograms.png` and `intervisit_histograms.txt`
pub fn generate_interval_analysis(
    config: &AnalysisConfig,
    dataset: &InMemoryDataset,
    timeline: &IniTimeline,
    phase: &str,
    output_dir: &Path,
) -> Result<()> {
    let (start, end) = timeline.time_bounds(phase)?;
    let visits = dataset.get_visits(
        &VisitFilter::new()
            .between(start, end)
            .order_by(VisitOrder::Start),
    )?;

    let bins = LogBins::intervisit();
    let panels = build_histogram_panels(&visits, config.cages, config.corners, &bins);

    let title = format!("Intervisit intervals in {}", phase);
    let table = format_table(&bin_rows(&panels, &bins), Some(title.as_str()));
    println!("{}", table);
    fs::write(output_dir.join("intervisit_histograms.txt"), table)?;

    let output_path = output_dir.join("intervisit_histograms.png");
    create_interval_grid_plot(
        &panels,
        config.cages,
        config.corners,
        &bins,
        &title,
        &output_path,
    )?;

    println!("✅ Histograms of {} visits written to {}", visits.len(), output_path.display());
    Ok(())
}
