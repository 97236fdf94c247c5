//! Input loading for scoring runs.
//!
//! Reads gold and predicted journal files (JSONL) into domain records.

pub mod jsonl;

pub use jsonl::{load_gold, load_jsonl, load_predicted, parse_jsonl};
