//! Evidence span comparison
//!
//! Two evidence spans "overlap" when one is contained in the other after
//! lowercasing. This is the only textual test the matcher applies.
//!
//! # Rules
//!
//! - **Case-insensitive**: both sides go through `str::to_lowercase`
//! - **No other normalization**: whitespace and punctuation are compared as-is
//! - **Symmetric**: `evidence_overlap(a, b) == evidence_overlap(b, a)`
//! - **Empty spans overlap everything**, including another empty span

/// Check whether two evidence spans overlap
///
/// Returns true if the lowercased `span_a` is a substring of the lowercased
/// `span_b`, or the other way around.
///
/// # Arguments
/// * `span_a` - Evidence span of one item
/// * `span_b` - Evidence span of the other item
///
/// # Returns
/// * `true` if either span contains the other
pub fn evidence_overlap(span_a: &str, span_b: &str) -> bool {
    let a = span_a.to_lowercase();
    let b = span_b.to_lowercase();

    b.contains(a.as_str()) || a.contains(b.as_str())
}
