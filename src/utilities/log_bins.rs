use crate::api::errors::{AnalysisError, Result};

/// Histogram bins evenly spaced on a base 10 logarithmic scale.
///
/// Bins are half-open `[low, high)` except for the last, which also
/// includes its upper edge. Values outside the edges, including every
/// value that is not positive, fall into no bin.
#[derive(Debug, Clone, PartialEq)]
pub struct LogBins {
    edges: Vec<f64>,
}

impl LogBins {
    /// `edge_count` edges from `10^min_exponent` to `10^max_exponent`, inclusive.
    pub fn new(min_exponent: f64, max_exponent: f64, edge_count: usize) -> Result<Self> {
        if edge_count < 2 || min_exponent >= max_exponent {
            return Err(AnalysisError::Configuration(format!(
                "Cannot build {} log bin edges from 10^{} to 10^{}",
                edge_count, min_exponent, max_exponent
            )));
        }

        Ok(Self::from_exponents(min_exponent, max_exponent, edge_count))
    }

    /// The bins used for intervisit intervals: 29 bins from 0.01 s to 10000 s.
    pub fn intervisit() -> Self {
        Self::from_exponents(-2.0, 4.0, 30)
    }

    fn from_exponents(min_exponent: f64, max_exponent: f64, edge_count: usize) -> Self {
        let step = (max_exponent - min_exponent) / (edge_count - 1) as f64;
        let edges = (0..edge_count)
            .map(|index| 10f64.powf(min_exponent + step * index as f64))
            .collect();

        Self { edges }
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(low, high)` edges of each bin.
    pub fn ranges(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.edges.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Index of the bin holding `value`.
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        let first = self.edges[0];
        let last = self.edges[self.edges.len() - 1];
        if !(first..=last).contains(&value) {
            return None;
        }

        // Number of edges <= value, minus one; the last edge closes the last bin.
        let index = self.edges.partition_point(|&edge| edge <= value) - 1;
        Some(index.min(self.len() - 1))
    }

    /// Number of values in each bin.
    pub fn histogram(&self, values: impl IntoIterator<Item = f64>) -> Vec<usize> {
        let mut counts = vec![0; self.len()];
        for index in values.into_iter().filter_map(|value| self.bin_of(value)) {
            counts[index] += 1;
        }

        counts
    }
}
