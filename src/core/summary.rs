//! Per-journal score rows and corpus-level averages.

use serde::{Deserialize, Serialize};

use super::metrics::{f1_score, ratio, Metrics};
use crate::domain::JournalId;

/// Metrics of one journal, flattened next to its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalScore {
    pub journal_id: JournalId,
    #[serde(flatten)]
    pub metrics: Metrics,
}

/// Precision, recall and F1 without counts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Averages {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Totals and averages over every scored journal
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// Number of journals scored
    pub journals: usize,

    #[serde(rename = "tp")]
    pub true_positives: usize,
    #[serde(rename = "fp")]
    pub false_positives: usize,
    #[serde(rename = "fn")]
    pub false_negatives: usize,

    /// Ratios of the summed counts
    pub micro: Averages,

    /// Mean of the per-journal ratios
    #[serde(rename = "macro")]
    pub macro_avg: Averages,
}

impl CorpusSummary {
    /// Aggregate per-journal scores
    pub fn from_scores(scores: &[JournalScore]) -> Self {
        let journals = scores.len();
        let mut summary = Self {
            journals,
            ..Self::default()
        };

        let mut precision_sum = 0.0;
        let mut recall_sum = 0.0;
        let mut f1_sum = 0.0;

        for score in scores {
            let m = &score.metrics;
            summary.true_positives += m.true_positives;
            summary.false_positives += m.false_positives;
            summary.false_negatives += m.false_negatives;
            precision_sum += m.precision;
            recall_sum += m.recall;
            f1_sum += m.f1;
        }

        let precision = ratio(
            summary.true_positives,
            summary.true_positives + summary.false_positives,
        );
        let recall = ratio(
            summary.true_positives,
            summary.true_positives + summary.false_negatives,
        );
        summary.micro = Averages {
            precision,
            recall,
            f1: f1_score(precision, recall),
        };

        if journals > 0 {
            let n = journals as f64;
            summary.macro_avg = Averages {
                precision: precision_sum / n,
                recall: recall_sum / n,
                f1: f1_sum / n,
            };
        }

        summary
    }
}
