//! Output files for scoring runs.
//!
//! - Per-journal scores: JSONL, one row per gold journal
//! - Summary: the same rows as a pretty-printed JSON array
//! - Manifest: run id, input digests and corpus averages (optional)

pub mod manifest;
pub mod writer;

pub use manifest::{compute_hash, digest_file, InputDigest, RunManifest};
pub use writer::{write_journal_scores, write_jsonl, write_pretty_json, write_summary};
