//! Greedy first-fit matching of predicted items to gold items.
//!
//! A predicted item may pair with a gold item when both have the same
//! `domain` and their evidence spans overlap. Predicted items are processed
//! in input order and each takes the first eligible gold item that is still
//! free. This is not a maximum bipartite matching: an early predicted item
//! can take a gold item a later one needed, and the result depends on input
//! order.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;
use tracing::trace;

use crate::domain::{FieldError, Scorable};
use crate::evidence::evidence_overlap;

/// Which input list an item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSide {
    Predicted,
    Gold,
}

impl ItemSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemSide::Predicted => "predicted",
            ItemSide::Gold => "gold",
        }
    }
}

impl fmt::Display for ItemSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that abort scoring of a journal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("{side} item {index}: {source}")]
    InvalidItem {
        side: ItemSide,
        index: usize,
        #[source]
        source: FieldError,
    },
}

/// An accepted pairing of one predicted item with one gold item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    /// Zero-based index into the predicted list
    pub predicted: usize,
    /// Zero-based index into the gold list
    pub gold: usize,
}

impl Match {
    /// The match as a `(predicted, gold)` tuple
    pub fn as_pair(&self) -> (usize, usize) {
        (self.predicted, self.gold)
    }
}

impl From<(usize, usize)> for Match {
    fn from((predicted, gold): (usize, usize)) -> Self {
        Self { predicted, gold }
    }
}

/// The two compared fields of one item, borrowed from the input
struct Candidate<'a> {
    domain: &'a Value,
    evidence: &'a str,
}

impl Candidate<'_> {
    fn accepts(&self, other: &Candidate<'_>) -> bool {
        domain_eq(self.domain, other.domain) && evidence_overlap(self.evidence, other.evidence)
    }
}

/// Domain equality with numbers compared by value: `1`, `1.0` and `true`
/// are the same domain, `1` and `"1"` are not
fn domain_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => number_eq(x, y),
        (Value::Bool(flag), Value::Number(n)) | (Value::Number(n), Value::Bool(flag)) => {
            number_eq(n, &Number::from(u8::from(*flag)))
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| domain_eq(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| domain_eq(x, y)))
        }
        _ => a == b,
    }
}

fn number_eq(x: &Number, y: &Number) -> bool {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x == y;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Read the compared fields of every item, failing on the first bad one
fn candidates<T: Scorable>(
    items: &[T],
    side: ItemSide,
) -> Result<Vec<Candidate<'_>>, ScoreError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let invalid = |source| ScoreError::InvalidItem { side, index, source };
            Ok(Candidate {
                domain: item.domain().map_err(invalid)?,
                evidence: item.evidence_span().map_err(invalid)?,
            })
        })
        .collect()
}

/// Match predicted items to gold items.
///
/// For each predicted item in order, the first gold item (in gold order)
/// that is not yet taken, has an equal `domain` and an overlapping evidence
/// span is paired with it. Unmatched items produce no entry.
///
/// Every item is checked for both fields before matching starts, so a bad
/// item fails the call even if it would never have been compared.
///
/// # Returns
/// * Matches in ascending predicted index; each index appears at most once
///   on either side
pub fn match_items<P, G>(predicted: &[P], gold: &[G]) -> Result<Vec<Match>, ScoreError>
where
    P: Scorable,
    G: Scorable,
{
    let predicted = candidates(predicted, ItemSide::Predicted)?;
    let gold = candidates(gold, ItemSide::Gold)?;

    let mut consumed = vec![false; gold.len()];
    let mut matches = Vec::new();

    for (p_idx, pred) in predicted.iter().enumerate() {
        let hit = gold
            .iter()
            .enumerate()
            .find(|(g_idx, candidate)| !consumed[*g_idx] && pred.accepts(candidate))
            .map(|(g_idx, _)| g_idx);

        if let Some(g_idx) = hit {
            trace!(predicted = p_idx, gold = g_idx, "Matched item");
            consumed[g_idx] = true;
            matches.push(Match {
                predicted: p_idx,
                gold: g_idx,
            });
        }
    }

    Ok(matches)
}
