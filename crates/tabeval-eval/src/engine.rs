use std::path::Path;
use std::time::Instant;

use tabeval_core::{Table, load_table_csv, validate_row_counts, validate_same_columns};

use crate::errors::EvalError;
use crate::metrics::{MetricsReport, write_metrics_json};
use crate::model::{ColumnMetrics, EvaluateOptions, EvaluationResult, PerformanceMetrics};
use crate::scoring::weighted_scores;

/// Compare AI-annotated tables with their ground truth.
#[derive(Debug, Clone, Default)]
pub struct EvaluationEngine {
    options: EvaluateOptions,
}

impl EvaluationEngine {
    pub fn new(options: EvaluateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EvaluateOptions {
        &self.options
    }

    /// Load both CSV files and compare them.
    ///
    /// When `metrics_out` is set the metrics artifact is written after a
    /// successful comparison. Nothing is written on failure.
    pub fn run(&self, ai_path: &Path, truth_path: &Path) -> Result<EvaluationResult, EvalError> {
        let total_start = Instant::now();
        let load_options = self.options.load_options();

        let ai = load_table_csv(ai_path, &load_options)?;
        let truth = load_table_csv(truth_path, &load_options)?;
        let load_ms = total_start.elapsed().as_millis();

        tracing::info!(
            event = "tables_loaded",
            ai_table = %ai_path.display(),
            ground_truth = %truth_path.display(),
            ai_rows = ai.row_count(),
            truth_rows = truth.row_count(),
            columns = ai.column_count(),
            load_ms = load_ms,
        );

        let mut result = self.compare(&ai, &truth)?;
        result.performance.load_ms = load_ms;
        result.performance.total_ms = total_start.elapsed().as_millis();

        if let Some(path) = &self.options.metrics_out {
            let report = MetricsReport::new(&result, ai_path, truth_path);
            write_metrics_json(path, &report)?;
            tracing::info!(event = "metrics_written", path = %path.display());
        }

        Ok(result)
    }

    /// Compare two loaded tables.
    ///
    /// Columns are scored in the AI table's order. Overall scores flatten
    /// both tables row-major using that same column order.
    pub fn compare(&self, ai: &Table, truth: &Table) -> Result<EvaluationResult, EvalError> {
        let compare_start = Instant::now();

        validate_same_columns(ai, truth)?;
        validate_row_counts(ai, truth)?;
        tracing::debug!(event = "schema_validated", columns = ai.column_count());

        let mut column_metrics = Vec::with_capacity(ai.column_count());
        for column in ai.columns() {
            let predicted = column_values(ai, column)?;
            let actual = column_values(truth, column)?;
            let scores = weighted_scores(&predicted, &actual)?;

            tracing::debug!(
                event = "column_scored",
                column = %column,
                precision = scores.precision,
                recall = scores.recall,
                f1_score = scores.f1_score,
                labels = scores.classes.len(),
            );

            column_metrics.push(ColumnMetrics {
                column: column.clone(),
                scores,
            });
        }

        let order = ai.columns();
        let all_predicted = flatten(ai, order)?;
        let all_actual = flatten(truth, order)?;
        let overall = weighted_scores(&all_predicted, &all_actual)?;

        let compare_ms = compare_start.elapsed().as_millis();
        tracing::info!(
            event = "evaluation_finished",
            rows = ai.row_count(),
            columns = ai.column_count(),
            precision = overall.precision,
            recall = overall.recall,
            f1_score = overall.f1_score,
            compare_ms = compare_ms,
        );

        Ok(EvaluationResult {
            column_metrics,
            overall,
            rows: ai.row_count(),
            performance: PerformanceMetrics {
                load_ms: 0,
                compare_ms,
                total_ms: compare_ms,
            },
        })
    }
}

fn column_values<'a>(table: &'a Table, column: &str) -> Result<Vec<&'a str>, EvalError> {
    table
        .column_values(column)
        .ok_or_else(|| EvalError::InvalidDataset(format!("column '{column}' not found")))
}

fn flatten<'a>(table: &'a Table, order: &[String]) -> Result<Vec<&'a str>, EvalError> {
    table.cells_row_major(order).ok_or_else(|| {
        EvalError::InvalidDataset("column order does not match table columns".to_string())
    })
}
