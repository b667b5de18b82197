use thiserror::Error;

/// Errors that can occur while loading or analyzing IntelliCage data.
///
/// Undefined numeric results (no qualifying visits, single sample errors)
/// are not errors; they are represented as [`None`] in the results.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The dataset or timeline could not resolve a subject, phase or time bound.
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Empty phase list, unknown group, mismatched column counts and similar.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to decompress zstd file: {0}")]
    Decompression(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Timeline syntax error on line {line}: {message}")]
    TimelineSyntax { line: usize, message: String },
}

pub type Result<T> = core::result::Result<T, AnalysisError>;
