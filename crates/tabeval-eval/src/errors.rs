use thiserror::Error;

/// Errors emitted by the evaluation engine.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Core(#[from] tabeval_core::Error),
    #[error("label sequences differ in length: {predicted} predicted vs {actual} actual")]
    LengthMismatch { predicted: usize, actual: usize },
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
