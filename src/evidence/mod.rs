//! Evidence comparison for item matching
//!
//! Evidence spans are short free-text snippets attached to each extracted
//! item as weak justification. When scoring, a predicted item can only be
//! paired with a gold item whose evidence overlaps its own.
//!
//! # Example
//!
//! ```
//! use journal_scorer::evidence::evidence_overlap;
//!
//! assert!(evidence_overlap("Paris", "paris, france"));
//! assert!(!evidence_overlap("abc", "xyz"));
//! ```

pub mod overlap;

pub use overlap::evidence_overlap;
