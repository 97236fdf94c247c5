//! `explain` subcommand: show how one journal was matched.
//!
//! Lists every accepted match with both evidence spans, then the items left
//! unmatched on each side, then the journal's metrics.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use crate::core::{compute_metrics, match_items, Match, Metrics};
use crate::domain::{AlignedJournal, Scorable};

/// Execute the `explain` command
pub async fn execute(gold: &Path, pred: &Path, journal_id: &str) -> Result<()> {
    let journals = super::load_aligned(gold, pred).await?;

    let journal = select_journal(&journals, journal_id)?;

    print!("{}", render(journal)?);
    Ok(())
}

/// Find the journal named on the command line.
///
/// An argument that parses as JSON picks the id with exactly that value, so
/// `42` names the numeric id and `"42"` the string one. Otherwise the id's
/// display form is compared.
pub fn select_journal<'a>(
    journals: &'a [AlignedJournal],
    arg: &str,
) -> Result<&'a AlignedJournal> {
    let literal = serde_json::from_str::<Value>(arg).ok();
    let exact: Vec<&AlignedJournal> = journals
        .iter()
        .filter(|j| literal.as_ref() == Some(j.journal_id.as_value()))
        .collect();

    let found = if exact.is_empty() {
        journals
            .iter()
            .filter(|j| j.journal_id.matches_str(arg))
            .collect()
    } else {
        exact
    };

    if found.len() > 1 {
        warn!(
            journal_id = arg,
            count = found.len(),
            "Several gold journals match, showing the first"
        );
    }

    found
        .first()
        .copied()
        .with_context(|| format!("Journal not found in gold: {}", arg))
}

/// Render the match report for one journal
pub fn render(journal: &AlignedJournal) -> Result<String> {
    let context = || format!("Failed to match journal {}", journal.journal_id);
    let matches = match_items(&journal.predicted, &journal.gold).with_context(context)?;
    let metrics = compute_metrics(&journal.predicted, &journal.gold).with_context(context)?;

    let mut out = String::new();
    out.push_str(&format!("Journal: {}\n", journal.journal_id));
    out.push_str(&format!(
        "Items: {} predicted, {} gold\n\n",
        journal.predicted.len(),
        journal.gold.len()
    ));

    out.push_str(&format!("Matches ({}):\n", matches.len()));
    for m in &matches {
        render_match(&mut out, journal, m)?;
    }

    let unmatched_predicted: Vec<usize> = (0..journal.predicted.len())
        .filter(|i| !matches.iter().any(|m| m.predicted == *i))
        .collect();
    out.push_str(&format!("\nUnmatched predicted ({}):\n", unmatched_predicted.len()));
    for idx in unmatched_predicted {
        render_item(&mut out, &format!("p{}", idx), &journal.predicted[idx])?;
    }

    let unmatched_gold: Vec<usize> = (0..journal.gold.len())
        .filter(|i| !matches.iter().any(|m| m.gold == *i))
        .collect();
    out.push_str(&format!("\nUnmatched gold ({}):\n", unmatched_gold.len()));
    for idx in unmatched_gold {
        render_item(&mut out, &format!("g{}", idx), &journal.gold[idx])?;
    }

    out.push('\n');
    out.push_str(&render_metrics(&metrics));
    Ok(out)
}

fn render_match(out: &mut String, journal: &AlignedJournal, m: &Match) -> Result<()> {
    let predicted = &journal.predicted[m.predicted];
    let gold = &journal.gold[m.gold];

    out.push_str(&format!(
        "  [p{} -> g{}] domain={}\n",
        m.predicted,
        m.gold,
        predicted.domain()?
    ));
    out.push_str(&format!("      predicted: {:?}\n", predicted.evidence_span()?));
    out.push_str(&format!("      gold:      {:?}\n", gold.evidence_span()?));
    Ok(())
}

fn render_item(out: &mut String, label: &str, item: &Value) -> Result<()> {
    out.push_str(&format!(
        "  [{}] domain={} {:?}\n",
        label,
        item.domain()?,
        item.evidence_span()?
    ));
    Ok(())
}

fn render_metrics(metrics: &Metrics) -> String {
    format!(
        "tp={} fp={} fn={} precision={:.4} recall={:.4} f1={:.4}\n",
        metrics.true_positives,
        metrics.false_positives,
        metrics.false_negatives,
        metrics.precision,
        metrics.recall,
        metrics.f1
    )
}
