//! Evaluation of AI-annotated tables against ground truth.
//!
//! Cells are treated as categorical labels and scored with support-weighted
//! precision, recall, and F1, per column and over all cells.

pub mod engine;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod report;
pub mod scoring;

pub use engine::EvaluationEngine;
pub use errors::EvalError;
pub use metrics::{METRICS_VERSION, MetricsReport, write_metrics_json};
pub use model::{ColumnMetrics, EvaluateOptions, EvaluationResult, PerformanceMetrics};
pub use report::render_report;
pub use scoring::{ClassScores, WeightedScores, weighted_scores};
