//! Errors surfaced by the command line tool

use crate::common::PlotError;
use intellicage_performance::prelude::AnalysisError;
use thiserror::Error;

/// Anything that can stop a run
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Plotting failed: {0}")]
    Plot(#[from] PlotError),

    #[error("Failed to write report: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

pub type Result<T> = core::result::Result<T, ToolError>;
