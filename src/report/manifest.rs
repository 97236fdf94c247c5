//! Run manifest: what was scored, when, and the corpus result.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::core::{CorpusSummary, Evaluation};

/// An input file and its content digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDigest {
    pub path: String,
    /// Format: "sha256:<hex>"
    pub sha256: String,
}

/// Provenance record for one scoring run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub gold: InputDigest,
    pub predicted: InputDigest,
    pub summary: CorpusSummary,
}

impl RunManifest {
    /// Build a manifest for a finished evaluation
    pub fn new(evaluation: &Evaluation, gold: InputDigest, predicted: InputDigest) -> Self {
        Self {
            run_id: evaluation.run_id,
            started_at: evaluation.started_at,
            gold,
            predicted,
            summary: evaluation.summary.clone(),
        }
    }
}

/// Compute SHA256 hash of a byte slice, returning hex string with prefix
pub fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Hash a file's content
pub fn digest_file(path: &Path) -> Result<InputDigest> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file for digest: {}", path.display()))?;

    Ok(InputDigest {
        path: path.display().to_string(),
        sha256: compute_hash(&bytes),
    })
}
