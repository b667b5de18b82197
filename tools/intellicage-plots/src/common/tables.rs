//! ASCII table formatting using the [`tabled`] crate

use tabled::{Table, Tabled};

/// One phase of a group's performance summary
#[derive(Debug, Clone, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Group")]
    pub group: String,
    #[tabled(rename = "Phase")]
    pub phase: String,
    #[tabled(rename = "Mean")]
    pub mean: String,
    #[tabled(rename = "Error")]
    pub error: String,
}

impl SummaryRow {
    /// Creates a row; ratios are shown as percentages, undefined values as `n/a`
    pub fn new(group: &str, phase: &str, mean: Option<f64>, error: Option<f64>) -> Self {
        Self {
            group: group.to_string(),
            phase: phase.to_string(),
            mean: format_percent(mean),
            error: format_percent(error),
        }
    }
}

/// One histogram bin of one (cage, corner) cell
#[derive(Debug, Clone, Tabled)]
pub struct BinRow {
    #[tabled(rename = "Cage")]
    pub cage: u32,
    #[tabled(rename = "Corner")]
    pub corner: u32,
    #[tabled(rename = "Interval [s]")]
    pub range: String,
    #[tabled(rename = "Count")]
    pub count: usize,
}

impl BinRow {
    pub fn new(cage: u32, corner: u32, (low, high): (f64, f64), count: usize) -> Self {
        Self {
            cage,
            corner,
            range: format!("{:.3}-{:.3}", low, high),
            count,
        }
    }
}

/// Number of first nosepokes to one side
#[derive(Debug, Clone, Tabled)]
pub struct SideRow {
    #[tabled(rename = "Side")]
    pub side: String,
    #[tabled(rename = "Count")]
    pub count: usize,
    #[tabled(rename = "Percentage")]
    pub percentage: String,
}

impl SideRow {
    pub fn new(side: &str, count: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            "0.00%".to_string()
        } else {
            format!("{:.2}%", (count as f64 / total as f64) * 100.0)
        };

        Self {
            side: side.to_string(),
            count,
            percentage,
        }
    }
}

fn format_percent(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "n/a".to_string(), |ratio| format!("{:.2}%", ratio * 100.0))
}

/// Formats rows as an ASCII table using the [`tabled`] crate
///
/// # Arguments
/// * `rows` - The rows to format
/// * `title` - Optional title for the table
///
/// # Returns
/// A formatted ASCII table as a [`String`]
pub fn format_table<T: Tabled>(rows: &[T], title: Option<&str>) -> String {
    if rows.is_empty() {
        return "No data available".to_string();
    }

    let table = Table::new(rows).to_string();

    if let Some(title) = title {
        format!("{}\n{}\n{}", title, "=".repeat(title.len()), table)
    } else {
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_row_formats_percentages() {
        let row = SummaryRow::new("odd", "PP dark", Some(0.5), None);
        assert_eq!(row.mean, "50.00%");
        assert_eq!(row.error, "n/a");
    }

    #[test]
    fn side_row_handles_zero_total() {
        assert_eq!(SideRow::new("left", 3, 4).percentage, "75.00%");
        assert_eq!(SideRow::new("left", 0, 0).percentage, "0.00%");
    }

    #[test]
    fn format_table_with_and_without_title() {
        let rows = vec![
            BinRow::new(1, 2, (0.01, 0.0161), 4),
            BinRow::new(1, 2, (0.0161, 0.0259), 0),
        ];

        let table = format_table(&rows, Some("Intervals"));
        assert!(table.starts_with("Intervals\n========="));
        assert!(table.contains("Interval [s]"));
        assert!(table.contains("0.010-0.016"));

        let table_no_title = format_table(&rows, None);
        assert!(!table_no_title.contains("Intervals\n"));
        assert!(table_no_title.contains("Corner"));
    }

    #[test]
    fn format_table_without_rows() {
        let rows: Vec<SideRow> = Vec::new();
        assert_eq!(format_table(&rows, Some("Sides")), "No data available");
    }
}
