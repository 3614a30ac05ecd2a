use crate::model::EvaluationResult;
use crate::scoring::WeightedScores;

const RULE_WIDTH: usize = 50;

/// Render the text report: a column-wise block followed by the overall block.
pub fn render_report(result: &EvaluationResult, decimals: usize) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut lines = Vec::new();

    lines.push(String::new());
    lines.push("Column-wise Metrics:".to_string());
    lines.push(rule.clone());
    for entry in &result.column_metrics {
        lines.push(String::new());
        lines.push(format!("Column: {}", entry.column));
        push_scores(&mut lines, &entry.scores, decimals);
    }

    lines.push(String::new());
    lines.push("Overall Performance:".to_string());
    lines.push(rule);
    push_scores(&mut lines, &result.overall, decimals);

    lines.join("\n")
}

fn push_scores(lines: &mut Vec<String>, scores: &WeightedScores, decimals: usize) {
    lines.push(format!("Precision: {:.*}", decimals, scores.precision));
    lines.push(format!("Recall: {:.*}", decimals, scores.recall));
    lines.push(format!("F1-score: {:.*}", decimals, scores.f1_score));
}
