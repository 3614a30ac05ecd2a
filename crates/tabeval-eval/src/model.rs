use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabeval_core::{DEFAULT_NULL_TOKENS, LoadOptions};

use crate::scoring::WeightedScores;

/// Options for a table evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluateOptions {
    /// Digits after the decimal point in the text report.
    pub decimals: usize,
    /// Field values treated as missing and compared as the empty label.
    pub null_tokens: Vec<String>,
    /// Optional path for the machine-readable metrics artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_out: Option<PathBuf>,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            decimals: 4,
            null_tokens: DEFAULT_NULL_TOKENS
                .iter()
                .map(|token| token.to_string())
                .collect(),
            metrics_out: None,
        }
    }
}

impl EvaluateOptions {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            null_tokens: self.null_tokens.clone(),
        }
    }
}

/// Scores for one column, named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetrics {
    pub column: String,
    #[serde(flatten)]
    pub scores: WeightedScores,
}

/// Timings for the evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub load_ms: u128,
    pub compare_ms: u128,
    pub total_ms: u128,
}

/// Result of comparing an AI table with its ground truth.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    /// Per-column scores in the AI table's column order.
    pub column_metrics: Vec<ColumnMetrics>,
    /// Scores over every cell of both tables, flattened row-major.
    pub overall: WeightedScores,
    pub rows: usize,
    pub performance: PerformanceMetrics,
}

impl EvaluationResult {
    pub fn column(&self, name: &str) -> Option<&WeightedScores> {
        self.column_metrics
            .iter()
            .find(|entry| entry.column == name)
            .map(|entry| &entry.scores)
    }
}
