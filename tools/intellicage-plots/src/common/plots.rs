//! Plotting infrastructure for phase-aligned charts
//!
//! This module provides functionality to draw performance curves over the
//! phases of an experiment and grids of intervisit interval histograms using
//! the [`plotters`] crate. Charts are saved as PNG files.

use chrono::{DateTime, Utc};
use intellicage_performance::prelude::*;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Background of dark phases.
const DARK_PHASE_FILL: RGBColor = RGBColor(0xE0, 0xE0, 0xE0);
/// Horizontal lines at every percent tick.
const REFERENCE_LINE: RGBColor = RGBColor(0xA0, 0xA0, 0xA0);
/// Opacity of the markers at phase midpoints.
const MARKER_ALPHA: f64 = 0.69;

/// Horizontal range of every histogram panel, in seconds.
pub const INTERVAL_AXIS_SECONDS: (f64, f64) = (0.05, 5000.0);
/// Vertical range of every histogram panel, in visits.
pub const INTERVAL_AXIS_COUNT: f64 = 70.0;
/// One second, one minute and one hour.
pub const INTERVAL_REFERENCE_SECONDS: [f64; 3] = [1.0, 60.0, 3600.0];

/// A group's performance placed on the time axis
#[derive(Debug, Clone)]
pub struct CurveSeries {
    /// Legend entry; the legend is drawn only when some series has one.
    pub label: Option<String>,
    pub color: RGBColor,
    pub points: Vec<SummaryPoint>,
}

/// Intervisit interval counts of one corner of one cage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramPanel {
    pub cage: u32,
    pub corner: u32,
    /// One count per bin of the [`LogBins`] the panel is drawn with.
    pub counts: Vec<usize>,
}

/// A linear axis labelled at fixed positions instead of evenly spaced ones
#[derive(Clone)]
pub struct TickedAxis {
    range: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickedAxis {
    pub fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        Self {
            range: range.into(),
            ticks,
        }
    }
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.range.map(value, limit)
    }

    /// Every tick, thinned evenly when there are more than the hint allows.
    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        let max_points = hint.max_num_points();
        if max_points == 0 {
            return Vec::new();
        }

        let step = self.ticks.len().div_ceil(max_points).max(1);
        self.ticks.iter().copied().step_by(step).collect()
    }

    fn range(&self) -> Range<f64> {
        self.range.range()
    }
}

/// Scoped drawing of a single bitmap figure
pub struct PhaseChart;

impl PhaseChart {
    /// Draws a figure on a white background and saves it to `output_path`
    ///
    /// The figure is presented whether `body` succeeds or not. When both
    /// drawing and presenting fail, the error of `body` is returned.
    ///
    /// # Arguments
    /// * `output_path` - Path where the PNG file should be saved
    /// * `size` - Width and height of the figure in pixels
    /// * `body` - Draws the figure's content on the root drawing area
    pub fn render<F>(output_path: &Path, size: (u32, u32), body: F) -> Result<()>
    where
        F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<()>,
    {
        let drawing_area = BitMapBackend::new(output_path, size).into_drawing_area();
        let drawn = drawing_area
            .fill(&WHITE)
            .map_err(|e| PlotError::DrawingArea(e.to_string()))
            .and_then(|()| body(&drawing_area));

        let presented = drawing_area
            .present()
            .map_err(|e| PlotError::Drawing(e.to_string()));

        drawn.and(presented)
    }
}

/// Percent ticks every 10% from 0 to `max_percent`, inclusive
pub fn percent_key_points(max_percent: u32) -> Vec<f64> {
    (0..=max_percent).step_by(10).map(f64::from).collect()
}

/// The `(start, end)` hours of every dark phase, relative to `origin`
pub fn dark_spans(phases: &[Phase], origin: DateTime<Utc>) -> Vec<(f64, f64)> {
    phases
        .iter()
        .filter(|phase| phase.is_dark())
        .map(|phase| {
            (
                hours_since(origin, phase.start),
                hours_since(origin, phase.end),
            )
        })
        .collect()
}

/// Splits a curve into runs of defined points, in percent
///
/// A phase without a mean breaks the line instead of being bridged.
pub fn curve_segments(points: &[SummaryPoint], origin: DateTime<Utc>) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for point in points {
        match point.mean {
            Some(mean) => current.push((hours_since(origin, point.midpoint), mean * 100.0)),
            None if !current.is_empty() => segments.push(core::mem::take(&mut current)),
            None => {}
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// `(x, low, high)` of each error bar, in percent; points without an error are skipped
pub fn error_bars(points: &[SummaryPoint], origin: DateTime<Utc>) -> Vec<(f64, f64, f64)> {
    points
        .iter()
        .filter_map(|point| {
            let (mean, error) = (point.mean?, point.error?);
            Some((
                hours_since(origin, point.midpoint),
                (mean - error) * 100.0,
                (mean + error) * 100.0,
            ))
        })
        .collect()
}

/// Clips every non-empty bin to the panel's axes, as `[(low, 0), (high, count)]` corners
pub fn bin_rectangles(bins: &LogBins, counts: &[usize]) -> Vec<[(f64, f64); 2]> {
    let (x_min, x_max) = INTERVAL_AXIS_SECONDS;
    bins.ranges()
        .zip(counts)
        .filter(|&((low, high), &count)| count > 0 && high > x_min && low < x_max)
        .map(|((low, high), &count)| {
            [
                (low.max(x_min), 0.0),
                (high.min(x_max), (count as f64).min(INTERVAL_AXIS_COUNT)),
            ]
        })
        .collect()
}

/// Label of a time axis tick: the phase it falls in, else its local time
fn time_label<T: TimelineSource + ?Sized>(
    timeline: &T,
    origin: DateTime<Utc>,
    hours: f64,
) -> String {
    let at = after_hours(origin, hours);
    match timeline.phase_label(at) {
        Some(label) => label.to_string(),
        None => at
            .with_timezone(&timeline.time_zone())
            .format("%m-%d %H:%M")
            .to_string(),
    }
}

fn format_seconds(seconds: f64) -> String {
    if seconds >= 1.0 {
        format!("{:.0}", seconds)
    } else {
        format!("{}", seconds)
    }
}

/// Draws group performance curves over the given phases and saves them as a PNG file
///
/// Dark phases are shaded, the x axis is ticked at light switches in the
/// timeline's zone and labelled with phase names, and every group mean is
/// marked at its phase's midpoint with an error bar.
///
/// # Arguments
/// * `series` - One curve per group, in legend order
/// * `phases` - Phases the curves were computed over, in order
/// * `timeline` - Source of tick labels and the local time zone
/// * `measure` - Determines the y axis label and range
/// * `title` - Chart title displayed at the top of the plot
/// * `output_path` - Path where the PNG file should be saved
///
/// # Returns
/// * `Ok(())` - If the chart was successfully created and saved
/// * `Err(PlotError)` - If an error occurred during chart generation
pub fn create_performance_plot<T: TimelineSource + ?Sized>(
    series: &[CurveSeries],
    phases: &[Phase],
    timeline: &T,
    measure: PerformanceMeasure,
    title: &str,
    output_path: &Path,
) -> Result<()> {
    let (Some(origin), Some(end)) = (
        phases.iter().map(|phase| phase.start).min(),
        phases.iter().map(|phase| phase.end).max(),
    ) else {
        return Err(PlotError::InvalidData("Phases cannot be empty".to_string()));
    };

    let x_max = hours_since(origin, end);
    if x_max <= 0.0 {
        return Err(PlotError::InvalidData(format!(
            "Phases span no time, starting and ending at {}",
            origin
        )));
    }

    let y_max = f64::from(measure.axis_max_percent());
    let y_ticks = percent_key_points(measure.axis_max_percent());
    let x_ticks = hour_ticks(origin, end, &LIGHT_SWITCH_HOURS, timeline.time_zone())
        .into_iter()
        .map(|tick| hours_since(origin, tick))
        .collect::<Vec<_>>();

    PhaseChart::render(output_path, (1200, 800), |drawing_area| {
        let mut chart_context = ChartBuilder::on(drawing_area)
            .caption(title, ("sans-serif", 40))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(85)
            .build_cartesian_2d(
                TickedAxis::new(0.0..x_max, x_ticks),
                TickedAxis::new(0.0..y_max, y_ticks.clone()),
            )
            .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

        let x_formatter = |hours: &f64| time_label(timeline, origin, *hours);
        let y_formatter = |percent: &f64| format!("{:.0}%", percent);
        chart_context
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .y_desc(measure.axis_label())
            .label_style(("sans-serif", 20))
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        chart_context
            .draw_series(
                dark_spans(phases, origin)
                    .into_iter()
                    .map(|(from, to)| Rectangle::new([(from, 0.0), (to, y_max)], DARK_PHASE_FILL.filled())),
            )
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        chart_context
            .draw_series(
                y_ticks
                    .iter()
                    .map(|&y| PathElement::new(vec![(0.0, y), (x_max, y)], REFERENCE_LINE)),
            )
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        let cap = x_max * 0.004;
        for curve in series {
            let color = curve.color;
            for (index, segment) in curve_segments(&curve.points, origin).into_iter().enumerate() {
                let drawn = chart_context
                    .draw_series(LineSeries::new(segment, color.stroke_width(2)))
                    .map_err(|e| PlotError::Drawing(e.to_string()))?;

                if let (0, Some(label)) = (index, &curve.label) {
                    drawn
                        .label(label.as_str())
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
                }
            }

            for (x, low, high) in error_bars(&curve.points, origin) {
                chart_context
                    .draw_series([
                        PathElement::new(vec![(x, low), (x, high)], BLACK),
                        PathElement::new(vec![(x - cap, low), (x + cap, low)], BLACK),
                        PathElement::new(vec![(x - cap, high), (x + cap, high)], BLACK),
                    ])
                    .map_err(|e| PlotError::Drawing(e.to_string()))?;
            }

            chart_context
                .draw_series(curve.points.iter().filter_map(|point| {
                    let x = hours_since(origin, point.midpoint);
                    point
                        .mean
                        .map(|mean| Circle::new((x, mean * 100.0), 5, color.mix(MARKER_ALPHA).filled()))
                }))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }

        if series.iter().any(|curve| curve.label.is_some()) {
            chart_context
                .configure_series_labels()
                .position(SeriesLabelPosition::LowerRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font(("sans-serif", 20))
                .draw()
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }

        Ok(())
    })
}

/// Draws a grid of intervisit interval histograms and saves it as a PNG file
///
/// Rows are corners and columns are cages. Every panel shares a logarithmic
/// x axis in seconds and a fixed count axis.
///
/// # Arguments
/// * `panels` - One histogram per (cage, corner), counts binned with `bins`
/// * `cages` - Number of grid columns
/// * `corners` - Number of grid rows
/// * `bins` - Bins the counts were computed with
/// * `title` - Title displayed above the grid
/// * `output_path` - Path where the PNG file should be saved
///
/// # Returns
/// * `Ok(())` - If the grid was successfully created and saved
/// * `Err(PlotError)` - If a panel is missing or an error occurred during drawing
pub fn create_interval_grid_plot(
    panels: &[HistogramPanel],
    cages: u32,
    corners: u32,
    bins: &LogBins,
    title: &str,
    output_path: &Path,
) -> Result<()> {
    if cages == 0 || corners == 0 {
        return Err(PlotError::InvalidData(format!(
            "Cannot lay out {} cages by {} corners",
            cages, corners
        )));
    }

    if let Some(panel) = panels.iter().find(|panel| panel.counts.len() != bins.len()) {
        return Err(PlotError::InvalidData(format!(
            "Cage #{} corner #{} has {} counts for {} bins",
            panel.cage,
            panel.corner,
            panel.counts.len(),
            bins.len()
        )));
    }

    let (x_min, x_max) = INTERVAL_AXIS_SECONDS;
    let height = 100 + 250 * corners;
    PhaseChart::render(output_path, (600 * cages, height), |drawing_area| {
        let grid_area = drawing_area
            .titled(title, ("sans-serif", 40))
            .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

        let cells = grid_area.split_evenly((corners as usize, cages as usize));
        let x_formatter = |seconds: &f64| format_seconds(*seconds);
        for (index, area) in cells.iter().enumerate() {
            let (row, column) = (index as u32 / cages, index as u32 % cages);
            let (cage, corner) = (column + 1, row + 1);
            let panel = panels
                .iter()
                .find(|panel| panel.cage == cage && panel.corner == corner)
                .ok_or_else(|| {
                    PlotError::InvalidData(format!("No histogram for cage #{} corner #{}", cage, corner))
                })?;

            let mut builder = ChartBuilder::on(area);
            builder.margin(10).x_label_area_size(40).y_label_area_size(60);
            if row == 0 {
                builder.caption(format!("cage #{}", cage), ("sans-serif", 24));
            }

            let mut chart_context = builder
                .build_cartesian_2d((x_min..x_max).log_scale(), 0.0..INTERVAL_AXIS_COUNT)
                .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

            let mut mesh = chart_context.configure_mesh();
            mesh.disable_x_mesh()
                .disable_y_mesh()
                .x_label_formatter(&x_formatter)
                .label_style(("sans-serif", 15));
            if column == 0 {
                mesh.y_desc(format!("corner #{}", corner));
            }
            if row == corners - 1 {
                mesh.x_desc("intervisit interval [s]");
            }
            mesh.draw().map_err(|e| PlotError::Drawing(e.to_string()))?;

            chart_context
                .draw_series(INTERVAL_REFERENCE_SECONDS.iter().map(|&seconds| {
                    PathElement::new(
                        vec![(seconds, 0.0), (seconds, INTERVAL_AXIS_COUNT)],
                        REFERENCE_LINE,
                    )
                }))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;

            chart_context
                .draw_series(
                    bin_rectangles(bins, &panel.counts)
                        .into_iter()
                        .map(|bounds| Rectangle::new(bounds, BLUE.mix(0.6).filled())),
                )
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }

        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;

    fn at(hours: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2012, 8, 31, 17, 0, 0).unwrap() + chrono::TimeDelta::hours(hours)
    }

    fn point(hours: i64, mean: Option<f64>, error: Option<f64>) -> SummaryPoint {
        SummaryPoint {
            midpoint: at(hours),
            mean,
            error,
        }
    }

    fn timeline() -> IniTimeline {
        IniTimeline::parse(
            "[DEFAULT]\ntzinfo = CET\n\n\
             [PP dark]\nstart = 2012-08-31 19:00\nend = 2012-09-01 07:00\n\n\
             [PP light]\nstart = 2012-09-01 07:00\nend = 2012-09-01 19:00\n",
        )
        .unwrap()
    }

    #[test]
    fn percent_ticks_every_ten_percent() {
        assert_eq!(percent_key_points(70), vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
        assert_eq!(percent_key_points(100).len(), 11);
    }

    #[test]
    fn shades_only_dark_phases() {
        let phases = timeline().all_phases().to_vec();
        let origin = phases[0].start;
        assert_eq!(dark_spans(&phases, origin), vec![(0.0, 12.0)]);
    }

    #[test]
    fn curve_breaks_at_undefined_means() {
        let points = vec![
            point(6, Some(0.5), None),
            point(18, None, None),
            point(30, Some(0.25), Some(0.1)),
            point(42, Some(0.75), Some(0.1)),
        ];

        let segments = curve_segments(&points, at(0));
        assert_eq!(segments, vec![vec![(6.0, 50.0)], vec![(30.0, 25.0), (42.0, 75.0)]]);
    }

    #[test]
    fn error_bars_skip_points_without_error() {
        let points = vec![point(6, Some(0.5), None), point(18, Some(0.5), Some(0.25))];
        assert_eq!(error_bars(&points, at(0)), vec![(18.0, 25.0, 75.0)]);
    }

    #[test]
    fn rectangles_are_clipped_to_the_axes() {
        // Edges: 0.01, 0.1, 1, 10, 100, 1000, 10000
        let bins = LogBins::new(-2.0, 4.0, 7).unwrap();
        let rectangles = bin_rectangles(&bins, &[3, 0, 80, 0, 0, 5]);

        assert_eq!(rectangles.len(), 3);
        assert_eq!(rectangles[0][0].0, 0.05);
        assert_eq!(rectangles[1][1].1, INTERVAL_AXIS_COUNT);
        assert_eq!(rectangles[2][1], (5000.0, 5.0));
    }

    #[test]
    fn ticked_axis_keeps_its_ticks() {
        let axis = TickedAxis::new(0.0..48.0, vec![2.0, 14.0, 26.0, 38.0]);

        assert_eq!(axis.key_points(10usize), vec![2.0, 14.0, 26.0, 38.0]);
        assert_eq!(axis.key_points(2usize), vec![2.0, 26.0]);
        assert!(axis.key_points(0usize).is_empty());
        assert_eq!(axis.range(), 0.0..48.0);
        assert_eq!(axis.map(&24.0, (0, 100)), 50);
    }

    #[test]
    fn ticked_axes_take_a_mesh() {
        let mut buffer = vec![0u8; 200 * 100 * 3];
        let drawing_area = BitMapBackend::with_buffer(&mut buffer, (200, 100)).into_drawing_area();
        let mut chart_context = ChartBuilder::on(&drawing_area)
            .build_cartesian_2d(
                TickedAxis::new(0.0..24.0, vec![2.0, 14.0]),
                TickedAxis::new(0.0..70.0, percent_key_points(70)),
            )
            .unwrap();

        let y_formatter = |percent: &f64| format!("{:.0}%", percent);
        chart_context
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .y_label_formatter(&y_formatter);

        chart_context
            .draw_series(LineSeries::new(vec![(2.0, 10.0), (14.0, 60.0)], BLUE))
            .unwrap();
    }

    #[test]
    fn presents_what_was_drawn() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("blank.png");

        PhaseChart::render(&output_path, (40, 30), |_| Ok(())).unwrap();
        assert!(fs::metadata(&output_path).unwrap().len() > 0);
    }

    #[test]
    fn presents_even_when_drawing_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("partial.png");

        let result = PhaseChart::render(&output_path, (40, 30), |drawing_area| {
            drawing_area
                .draw(&Rectangle::new([(0, 0), (10, 10)], BLUE.filled()))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
            Err(PlotError::InvalidData("stopped".to_string()))
        });

        assert!(matches!(result, Err(PlotError::InvalidData(_))));
        assert!(output_path.exists());
    }

    #[test]
    fn drawing_error_wins_over_presenting_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("missing").join("figure.png");

        let failed_body = PhaseChart::render(&output_path, (40, 30), |_| {
            Err(PlotError::InvalidData("stopped".to_string()))
        });
        assert!(matches!(failed_body, Err(PlotError::InvalidData(_))));

        let failed_present = PhaseChart::render(&output_path, (40, 30), |_| Ok(()));
        assert!(matches!(failed_present, Err(PlotError::Drawing(_))));
    }

    #[test]
    fn rejects_empty_phases() {
        let output_path = std::env::temp_dir().join("intellicage_empty_phases.png");
        let result = create_performance_plot(
            &[],
            &[],
            &timeline(),
            PerformanceMeasure::CornerPreference,
            "Empty",
            &output_path,
        );
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }

    #[test]
    fn rejects_mismatched_histograms() {
        let output_path = std::env::temp_dir().join("intellicage_mismatched_bins.png");
        let panels = vec![HistogramPanel {
            cage: 1,
            corner: 1,
            counts: vec![0; 3],
        }];

        let result = create_interval_grid_plot(&panels, 1, 1, &LogBins::intervisit(), "Bad", &output_path);
        assert!(matches!(result, Err(PlotError::InvalidData(_))));
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn draws_performance_and_histogram_plots() {
        let temp_dir = tempfile::tempdir().unwrap();
        let timeline = timeline();
        let phases = timeline.all_phases().to_vec();

        let series = vec![CurveSeries {
            label: Some("odd".to_string()),
            color: BLUE,
            points: vec![point(6, Some(0.4), Some(0.05)), point(18, Some(0.6), None)],
        }];
        let performance_path = temp_dir.path().join("performance.png");
        create_performance_plot(
            &series,
            &phases,
            &timeline,
            PerformanceMeasure::CornerPreference,
            "Test",
            &performance_path,
        )
        .unwrap();
        assert!(performance_path.exists());

        let bins = LogBins::intervisit();
        let panels = (1..=2)
            .flat_map(|corner| {
                (1..=2).map(move |cage| HistogramPanel {
                    cage,
                    corner,
                    counts: vec![1; 29],
                })
            })
            .collect::<Vec<_>>();
        let grid_path = temp_dir.path().join("intervals.png");
        create_interval_grid_plot(&panels, 2, 2, &bins, "Test", &grid_path).unwrap();
        assert!(fs::metadata(&grid_path).unwrap().len() > 0);
    }
}
