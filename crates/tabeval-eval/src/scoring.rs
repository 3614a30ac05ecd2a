use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::EvalError;

/// Confusion counts and scores for a single label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    pub label: String,
    pub true_positives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    /// Occurrences of the label in the ground-truth sequence.
    pub support: u64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Support-weighted precision, recall, and F1 over all labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedScores {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Number of aligned label pairs scored.
    pub support: u64,
    /// Per-label breakdown, sorted by label.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassScores>,
}

impl WeightedScores {
    fn empty() -> Self {
        Self {
            precision: 0.0,
            recall: 0.0,
            f1_score: 0.0,
            support: 0,
            classes: Vec::new(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Counts {
    tp: u64,
    fp: u64,
    fn_: u64,
}

/// Score `predicted` labels against row-aligned `actual` labels.
///
/// Every distinct label seen in either sequence is one class. Per-class
/// precision and recall are 0 when their denominator is 0, and F1 is 0 when
/// both are 0. The aggregate weights each class by its support in `actual`,
/// so labels that never occur in `actual` carry no weight. Empty input
/// scores 0 across the board.
pub fn weighted_scores<P, A>(predicted: &[P], actual: &[A]) -> Result<WeightedScores, EvalError>
where
    P: AsRef<str>,
    A: AsRef<str>,
{
    if predicted.len() != actual.len() {
        return Err(EvalError::LengthMismatch {
            predicted: predicted.len(),
            actual: actual.len(),
        });
    }
    if actual.is_empty() {
        return Ok(WeightedScores::empty());
    }

    let mut counts: BTreeMap<&str, Counts> = BTreeMap::new();
    for (pred, truth) in predicted.iter().zip(actual) {
        let (pred, truth) = (pred.as_ref(), truth.as_ref());
        if pred == truth {
            counts.entry(pred).or_default().tp += 1;
        } else {
            counts.entry(pred).or_default().fp += 1;
            counts.entry(truth).or_default().fn_ += 1;
        }
    }

    let total = actual.len() as f64;
    let mut precision = 0.0;
    let mut recall = 0.0;
    let mut f1_score = 0.0;
    let mut classes = Vec::with_capacity(counts.len());

    for (label, counts) in counts {
        let class = class_scores(label, counts);
        let weight = class.support as f64;
        precision += class.precision * weight;
        recall += class.recall * weight;
        f1_score += class.f1_score * weight;
        classes.push(class);
    }

    Ok(WeightedScores {
        precision: precision / total,
        recall: recall / total,
        f1_score: f1_score / total,
        support: actual.len() as u64,
        classes,
    })
}

fn class_scores(label: &str, counts: Counts) -> ClassScores {
    let precision = ratio(counts.tp, counts.tp + counts.fp);
    let recall = ratio(counts.tp, counts.tp + counts.fn_);
    let f1_score = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassScores {
        label: label.to_string(),
        true_positives: counts.tp,
        false_positives: counts.fp,
        false_negatives: counts.fn_,
        support: counts.tp + counts.fn_,
        precision,
        recall,
        f1_score,
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(left: f64, right: f64) -> bool {
        (left - right).abs() < 1e-9
    }

    #[test]
    fn identical_sequences_score_one() {
        let labels = ["a", "b", "b", ""];
        let scores = weighted_scores(&labels, &labels).expect("score");
        assert_eq!(scores.precision, 1.0);
        assert_eq!(scores.recall, 1.0);
        assert_eq!(scores.f1_score, 1.0);
        assert_eq!(scores.support, 4);
    }

    #[test]
    fn disjoint_labels_score_zero() {
        let scores = weighted_scores(&["x", "y"], &["a", "b"]).expect("score");
        assert_eq!(scores.precision, 0.0);
        assert_eq!(scores.recall, 0.0);
        assert_eq!(scores.f1_score, 0.0);
    }

    #[test]
    fn unsupported_prediction_carries_no_weight() {
        let scores = weighted_scores(&["x", "y", "x"], &["x", "x", "x"]).expect("score");
        assert!(approx(scores.precision, 1.0));
        assert!(approx(scores.recall, 2.0 / 3.0));
        assert!(approx(scores.f1_score, 0.8));

        let y = scores
            .classes
            .iter()
            .find(|class| class.label == "y")
            .expect("class y");
        assert_eq!(y.true_positives, 0);
        assert_eq!(y.false_positives, 1);
        assert_eq!(y.false_negatives, 0);
        assert_eq!(y.support, 0);

        let x = scores
            .classes
            .iter()
            .find(|class| class.label == "x")
            .expect("class x");
        assert_eq!(
            (x.true_positives, x.false_positives, x.false_negatives, x.support),
            (2, 0, 1, 3)
        );
    }

    #[test]
    fn weights_follow_true_support() {
        // a: tp=2 fp=1 fn=1 support=3; b: tp=0 fp=1 fn=1 support=1.
        let predicted = ["a", "a", "b", "a"];
        let actual = ["a", "a", "a", "b"];
        let scores = weighted_scores(&predicted, &actual).expect("score");

        let precision_a = 2.0 / 3.0;
        let recall_a = 2.0 / 3.0;
        assert!(approx(scores.precision, precision_a * 3.0 / 4.0));
        assert!(approx(scores.recall, recall_a * 3.0 / 4.0));
        assert!(approx(scores.f1_score, (2.0 / 3.0) * 3.0 / 4.0));
    }

    #[test]
    fn empty_label_is_an_ordinary_class() {
        let scores = weighted_scores(&["", "a"], &["", "b"]).expect("score");
        let empty = scores
            .classes
            .iter()
            .find(|class| class.label.is_empty())
            .expect("empty class");
        assert_eq!(empty.true_positives, 1);
        assert!(approx(scores.recall, 0.5));
    }

    #[test]
    fn empty_input_scores_zero() {
        let empty: [&str; 0] = [];
        let scores = weighted_scores(&empty, &empty).expect("score");
        assert_eq!(scores, WeightedScores::empty());
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = weighted_scores(&["a"], &["a", "b"]).unwrap_err();
        assert!(matches!(
            err,
            EvalError::LengthMismatch {
                predicted: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn scores_stay_in_unit_range() {
        let predicted = ["a", "b", "c", "a", "", "b", "d"];
        let actual = ["b", "b", "a", "a", "", "c", "c"];
        let scores = weighted_scores(&predicted, &actual).expect("score");
        for value in [scores.precision, scores.recall, scores.f1_score] {
            assert!((0.0..=1.0).contains(&value));
        }
        for class in &scores.classes {
            for value in [class.precision, class.recall, class.f1_score] {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }
}
