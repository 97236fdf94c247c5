//! Scoring run over a whole corpus of aligned journals.
//!
//! Journals are independent: each is matched and scored on its own, and a
//! failure in one aborts the run without producing partial output.

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::AlignedJournal;

use super::matcher::ScoreError;
use super::metrics::compute_metrics;
use super::summary::{CorpusSummary, JournalScore};

/// Outcome of one scoring run
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Unique id of this run
    pub run_id: Uuid,

    /// When scoring started
    pub started_at: DateTime<Utc>,

    /// One row per journal, in input order
    pub scores: Vec<JournalScore>,

    /// Corpus totals and averages
    pub summary: CorpusSummary,
}

/// Score a single aligned journal
pub fn score_journal(journal: &AlignedJournal) -> Result<JournalScore, ScoreError> {
    let metrics = compute_metrics(&journal.predicted, &journal.gold)?;

    Ok(JournalScore {
        journal_id: journal.journal_id.clone(),
        metrics,
    })
}

/// Corpus scorer
#[derive(Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Create a new evaluator
    pub fn new() -> Self {
        Self
    }

    /// Score every journal in order
    #[instrument(skip(self, journals), fields(journals = journals.len()))]
    pub fn evaluate(&self, journals: &[AlignedJournal]) -> Result<Evaluation> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();
        info!(%run_id, "Starting scoring run");

        let mut scores = Vec::with_capacity(journals.len());
        for journal in journals {
            let score = score_journal(journal)
                .with_context(|| format!("Failed to score journal {}", journal.journal_id))?;

            debug!(
                journal_id = %score.journal_id,
                true_positives = score.metrics.true_positives,
                false_positives = score.metrics.false_positives,
                false_negatives = score.metrics.false_negatives,
                "Scored journal"
            );
            scores.push(score);
        }

        let summary = CorpusSummary::from_scores(&scores);
        info!(
            %run_id,
            journals = summary.journals,
            micro_f1 = summary.micro.f1,
            duration_ms = start.elapsed().as_millis() as u64,
            "Scoring run completed"
        );

        Ok(Evaluation {
            run_id,
            started_at,
            scores,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JournalId;
    use serde_json::{json, Value};

    fn journal(id: &str, predicted: Vec<Value>, gold: Vec<Value>) -> AlignedJournal {
        AlignedJournal {
            journal_id: JournalId::new(id),
            predicted,
            gold,
        }
    }

    #[test]
    fn test_evaluate_scores_each_journal() {
        let journals = vec![
            journal(
                "j1",
                vec![json!({"domain": "loc", "evidence_span": "Paris"})],
                vec![
                    json!({"domain": "loc", "evidence_span": "Paris, France"}),
                    json!({"domain": "org", "evidence_span": "UN"}),
                ],
            ),
            journal("j2", vec![], vec![json!({"domain": "org", "evidence_span": "WHO"})]),
        ];

        let evaluation = Evaluator::new().evaluate(&journals).unwrap();
        assert_eq!(evaluation.scores.len(), 2);
        assert_eq!(evaluation.scores[0].journal_id, JournalId::new("j1"));
        assert_eq!(evaluation.scores[0].metrics.recall, 0.5);
        assert_eq!(evaluation.scores[1].metrics.false_negatives, 1);
        assert_eq!(evaluation.summary.journals, 2);
        assert_eq!(evaluation.summary.false_negatives, 2);
    }

    #[test]
    fn test_bad_item_aborts_run_with_journal_context() {
        let journals = vec![
            journal("ok", vec![], vec![]),
            journal("broken", vec![json!({"evidence_span": "x"})], vec![]),
        ];

        let err = Evaluator::new().evaluate(&journals).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("broken"), "{message}");
        assert!(message.contains("predicted item 0"), "{message}");
        assert!(message.contains("domain"), "{message}");
    }
}
