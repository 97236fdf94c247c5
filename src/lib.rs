//! journal-scorer - Score extracted items against a gold standard
//!
//! Computes per-journal precision, recall and F1 for predicted extraction
//! results, by pairing predicted items with gold items.
//!
//! # Matching
//!
//! A predicted item matches a gold item when:
//! - both have exactly the same `domain`, and
//! - one `evidence_span` contains the other, ignoring case
//!
//! Predicted items are matched greedily in input order; each takes the first
//! free gold item that qualifies.
//!
//! # Modules
//!
//! - `evidence`: Evidence span comparison
//! - `core`: Matching, metrics and scoring runs
//! - `domain`: Data structures (Item, Journal)
//! - `ingest`: JSONL input loading
//! - `report`: Result and manifest files
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Score predictions against gold
//! journal-scorer score --gold gold.jsonl --pred pred.jsonl --out summary.json
//!
//! # See how one journal was matched
//! journal-scorer explain --gold gold.jsonl --pred pred.jsonl --journal j1
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod evidence;
pub mod ingest;
pub mod report;

// Re-export main types at crate root for convenience
pub use crate::core::{
    compute_metrics, match_items, CorpusSummary, Evaluation, Evaluator, JournalScore, Match,
    Metrics, ScoreError,
};
pub use crate::domain::{AlignedJournal, FieldError, Item, JournalId, Scorable};
pub use crate::evidence::evidence_overlap;
