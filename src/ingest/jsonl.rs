//! JSONL readers for gold and predicted journal files.
//!
//! Each non-blank line holds one journal object. Errors name the file and
//! the 1-based line number of the offending record.

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::info;

use crate::domain::{GoldJournal, PredictedJournal};

/// Parse newline-delimited JSON, skipping blank lines
///
/// # Arguments
/// * `content` - The full file content
/// * `source` - Name used in error messages (usually the file path)
pub fn parse_jsonl<T: DeserializeOwned>(content: &str, source: &str) -> Result<Vec<T>> {
    let mut records = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let record = serde_json::from_str(line)
            .with_context(|| format!("Failed to parse {} line {}", source, idx + 1))?;
        records.push(record);
    }

    Ok(records)
}

/// Read and parse a JSONL file
pub async fn load_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    parse_jsonl(&content, &path.display().to_string())
}

/// Load the gold-standard journals
pub async fn load_gold(path: &Path) -> Result<Vec<GoldJournal>> {
    let journals: Vec<GoldJournal> = load_jsonl(path).await?;
    info!(path = %path.display(), journals = journals.len(), "Loaded gold journals");
    Ok(journals)
}

/// Load the predicted journals
pub async fn load_predicted(path: &Path) -> Result<Vec<PredictedJournal>> {
    let journals: Vec<PredictedJournal> = load_jsonl(path).await?;
    info!(path = %path.display(), journals = journals.len(), "Loaded predicted journals");
    Ok(journals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    #[test]
    fn test_parse_skips_blank_lines() {
        let content = "{\"a\": 1}\n\n   \n{\"a\": 2}\n";
        let records: Vec<Value> = parse_jsonl(content, "test").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["a"], 2);
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let content = "{\"a\": 1}\n\n{not json}\n";
        let err = parse_jsonl::<Value>(content, "gold.jsonl").unwrap_err();
        assert!(err.to_string().contains("gold.jsonl line 3"), "{}", err);
    }

    #[test]
    fn test_parse_handles_crlf() {
        let content = "{\"a\": 1}\r\n{\"a\": 2}\r\n";
        let records: Vec<Value> = parse_jsonl(content, "test").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn test_load_gold_and_predicted() {
        let temp = TempDir::new().unwrap();
        let gold_path = temp.path().join("gold.jsonl");
        let pred_path = temp.path().join("pred.jsonl");

        std::fs::write(
            &gold_path,
            r#"{"journal_id": "j1", "items": [{"domain": "loc", "evidence_span": "Paris"}]}"#,
        )
        .unwrap();
        std::fs::write(&pred_path, "{\"journal_id\": \"j1\"}\n").unwrap();

        let gold = load_gold(&gold_path).await.unwrap();
        assert_eq!(gold.len(), 1);
        assert_eq!(gold[0].items.len(), 1);

        let predicted = load_predicted(&pred_path).await.unwrap();
        assert_eq!(predicted.len(), 1);
        assert!(predicted[0].items.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_gold(&temp.path().join("nope.jsonl")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
