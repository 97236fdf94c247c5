//! Core scoring logic.
//!
//! This module contains:
//! - Matcher: greedy first-fit pairing of predicted and gold items
//! - Metrics: confusion counts and precision/recall/F1 per journal
//! - Summary: per-journal rows and corpus averages
//! - Evaluator: scoring run over all journals

pub mod evaluator;
pub mod matcher;
pub mod metrics;
pub mod summary;

// Re-export commonly used types
pub use evaluator::{score_journal, Evaluation, Evaluator};
pub use matcher::{match_items, ItemSide, Match, ScoreError};
pub use metrics::{compute_metrics, Metrics};
pub use summary::{Averages, CorpusSummary, JournalScore};
