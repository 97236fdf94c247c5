//! Journal records and gold/prediction alignment.
//!
//! A journal is one scored document: an identifier plus the items extracted
//! from it. Gold and predicted files each hold one journal per line; they are
//! paired up by `journal_id` before scoring.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Journal identifier as it appears in the input (string or number)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JournalId(Value);

impl JournalId {
    /// Wrap a raw identifier value
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// The identifier as read from the input
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Check whether a user-supplied string names this journal
    pub fn matches_str(&self, s: &str) -> bool {
        self.to_string() == s
    }

    /// Canonical key; `"1"` and `1` stay distinct
    fn key(&self) -> String {
        self.0.to_string()
    }
}

impl Hash for JournalId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for JournalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// A gold-standard journal line; `items` is required
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldJournal {
    pub journal_id: JournalId,
    pub items: Vec<Value>,
}

/// A predicted journal line; a missing `items` key means no predictions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictedJournal {
    pub journal_id: JournalId,
    #[serde(default)]
    pub items: Vec<Value>,
}

/// Gold and predicted items for the same journal, ready to score
#[derive(Debug, Clone)]
pub struct AlignedJournal {
    pub journal_id: JournalId,
    pub predicted: Vec<Value>,
    pub gold: Vec<Value>,
}

/// Pair predicted journals with gold journals by `journal_id`.
///
/// Gold drives the result: one entry per gold journal, in gold order.
/// A gold journal without a prediction is paired with an empty list.
/// When several predicted lines share an id, the last one wins. Gold lines
/// that repeat an id each get that prediction.
/// Predicted journals unknown to gold are dropped.
pub fn align_journals(
    gold: Vec<GoldJournal>,
    predicted: Vec<PredictedJournal>,
) -> Vec<AlignedJournal> {
    let mut predicted_by_id: HashMap<JournalId, Vec<Value>> = HashMap::new();
    for journal in predicted {
        predicted_by_id.insert(journal.journal_id, journal.items);
    }

    let mut used: HashSet<JournalId> = HashSet::new();

    let aligned: Vec<AlignedJournal> = gold
        .into_iter()
        .map(|journal| {
            let predicted = match predicted_by_id.get(&journal.journal_id) {
                Some(items) => {
                    used.insert(journal.journal_id.clone());
                    items.clone()
                }
                None => {
                    debug!(journal_id = %journal.journal_id, "No predictions for gold journal");
                    Vec::new()
                }
            };

            AlignedJournal {
                journal_id: journal.journal_id,
                predicted,
                gold: journal.items,
            }
        })
        .collect();

    for journal_id in predicted_by_id.keys().filter(|id| !used.contains(*id)) {
        debug!(%journal_id, "Predicted journal has no gold counterpart, ignoring");
    }

    aligned
}
