use std::path::PathBuf;

use thiserror::Error;

/// Core error type shared across tabeval crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The file is missing, unreadable, or not parsable as CSV.
    #[error("failed to load {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },
    /// An in-memory table violates its shape invariants.
    #[error("invalid table: {0}")]
    InvalidTable(String),
    /// Column name sets differ between the two tables.
    #[error(
        "tables must have the same columns (only in AI table: [{}]; only in ground truth: [{}])",
        .only_in_ai.join(", "),
        .only_in_truth.join(", ")
    )]
    SchemaMismatch {
        only_in_ai: Vec<String>,
        only_in_truth: Vec<String>,
    },
    /// Row counts differ, so rows cannot be aligned by index.
    #[error("row count mismatch: AI table has {ai_rows} row(s), ground truth has {truth_rows}")]
    RowCountMismatch { ai_rows: usize, truth_rows: usize },
}

impl Error {
    pub(crate) fn load(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Error::Load {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Convenience alias for results returned by tabeval crates.
pub type Result<T> = std::result::Result<T, Error>;
