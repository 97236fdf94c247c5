//! Result file writers.
//!
//! Files are written under an exclusive advisory lock so concurrent runs
//! pointed at the same path cannot interleave rows.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::Serialize;

use crate::core::JournalScore;

/// Open `path` for writing, creating parent directories and truncating
fn create_locked(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;

    file.lock_exclusive()
        .with_context(|| format!("Failed to acquire file lock on {}", path.display()))?;

    Ok(file)
}

/// Write one JSON object per line
pub fn write_jsonl<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = create_locked(path)?;
    let mut writer = BufWriter::new(&file);

    for row in rows {
        let json = serde_json::to_string(row).context("Failed to serialize row")?;
        writeln!(writer, "{}", json).context("Failed to write row")?;
    }
    writer.flush().context("Failed to flush output")?;

    // Lock is released when file is dropped
    Ok(())
}

/// Write a value as pretty-printed JSON
pub fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = create_locked(path)?;
    let mut writer = BufWriter::new(&file);

    serde_json::to_writer_pretty(&mut writer, value).context("Failed to serialize JSON")?;
    writeln!(writer).context("Failed to write output")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}

/// Write per-journal scores as JSONL
pub fn write_journal_scores(path: &Path, scores: &[JournalScore]) -> Result<()> {
    write_jsonl(path, scores)
}

/// Write all per-journal scores as one pretty-printed JSON array
pub fn write_summary(path: &Path, scores: &[JournalScore]) -> Result<()> {
    write_pretty_json(path, scores)
}
