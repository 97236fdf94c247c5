//! Confusion counts and precision/recall/F1 for one journal.

use serde::{Deserialize, Serialize};

use super::matcher::{match_items, ScoreError};
use crate::domain::Scorable;

/// Scoring result for one (predicted, gold) pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// Predicted items paired with a gold item
    #[serde(rename = "tp")]
    pub true_positives: usize,

    /// Predicted items left unmatched
    #[serde(rename = "fp")]
    pub false_positives: usize,

    /// Gold items never matched
    #[serde(rename = "fn")]
    pub false_negatives: usize,

    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl Metrics {
    /// Derive the three ratios from confusion counts.
    ///
    /// Empty denominators yield `0.0` rather than NaN.
    pub fn from_counts(
        true_positives: usize,
        false_positives: usize,
        false_negatives: usize,
    ) -> Self {
        let precision = ratio(true_positives, true_positives + false_positives);
        let recall = ratio(true_positives, true_positives + false_negatives);

        Self {
            true_positives,
            false_positives,
            false_negatives,
            precision,
            recall,
            f1: f1_score(precision, recall),
        }
    }
}

/// `num / den`, or `0.0` when `den` is zero
pub(crate) fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        return 0.0;
    }
    num as f64 / den as f64
}

/// Harmonic mean of precision and recall, `0.0` when both are zero
pub(crate) fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / (precision + recall)
}

/// Match `predicted` against `gold` and compute the journal's metrics.
///
/// `tp` is the number of matches; every other predicted item is a false
/// positive and every other gold item a false negative.
pub fn compute_metrics<P, G>(predicted: &[P], gold: &[G]) -> Result<Metrics, ScoreError>
where
    P: Scorable,
    G: Scorable,
{
    let tp = match_items(predicted, gold)?.len();

    Ok(Metrics::from_counts(tp, predicted.len() - tp, gold.len() - tp))
}
