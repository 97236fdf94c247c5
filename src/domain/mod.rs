//! Domain types for journal scoring.
//!
//! This module contains the input data structures:
//! - Item: one extracted unit (domain + evidence span)
//! - Journal: a document's items, and gold/prediction alignment

pub mod item;
pub mod journal;

// Re-export commonly used types
pub use item::{FieldError, Item, Scorable, DOMAIN_FIELD, EVIDENCE_FIELD};
pub use journal::{align_journals, AlignedJournal, GoldJournal, JournalId, PredictedJournal};
