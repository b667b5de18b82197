//! Common infrastructure shared across analyses
//!
//! This module provides reusable infrastructure for:
//! - ASCII table formatting of summaries, histograms and counts
//! - Drawing phase-aligned performance charts and histogram grids

pub mod plots;
pub mod tables;

// Re-export commonly used items
pub use plots::PlotError;
