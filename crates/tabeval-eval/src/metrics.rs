use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::EvalError;
use crate::model::{ColumnMetrics, EvaluationResult, PerformanceMetrics};
use crate::scoring::WeightedScores;

/// Metrics contract version for evaluation artifacts.
pub const METRICS_VERSION: &str = "0.1";

/// Machine-readable metrics for a table evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub metrics_version: String,
    pub run_id: String,
    pub evaluated_at: String,
    pub inputs: MetricsInputs,
    pub column_metrics: Vec<ColumnMetrics>,
    pub overall_metrics: WeightedScores,
    pub performance: PerformanceMetrics,
}

/// Inputs the report was computed from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsInputs {
    pub ai_table: PathBuf,
    pub ground_truth: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

impl MetricsReport {
    pub fn new(result: &EvaluationResult, ai_table: &Path, ground_truth: &Path) -> Self {
        Self {
            metrics_version: METRICS_VERSION.to_string(),
            run_id: uuid::Uuid::new_v4().to_string(),
            evaluated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            inputs: MetricsInputs {
                ai_table: ai_table.to_path_buf(),
                ground_truth: ground_truth.to_path_buf(),
                rows: result.rows,
                columns: result.column_metrics.len(),
            },
            column_metrics: result.column_metrics.clone(),
            overall_metrics: result.overall.clone(),
            performance: result.performance.clone(),
        }
    }
}

/// Write the metrics report as pretty JSON, creating parent directories.
pub fn write_metrics_json(path: &Path, report: &MetricsReport) -> Result<(), EvalError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_vec_pretty(report)?)?;
    Ok(())
}
