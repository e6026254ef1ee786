//! Best-score persistence as a small JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: u32,
}

/// Read the stored best score. A missing file counts as zero.
pub fn load(path: &Path) -> Result<u32, HighScoreError> {
    if !path.exists() {
        return Ok(0);
    }
    let json = fs::read_to_string(path)?;
    let record: HighScoreRecord = serde_json::from_str(&json)?;
    Ok(record.score)
}

/// Like [`load`], but logs and returns zero on any failure.
pub fn load_or_zero(path: &Path) -> u32 {
    load(path).unwrap_or_else(|e| {
        log::warn!("Ignoring high score at {:?}: {}", path, e);
        0
    })
}

/// Persist `score` only if it beats what is stored. Returns whether the file
/// was written.
pub fn save_if_higher(path: &Path, score: u32) -> Result<bool, HighScoreError> {
    let current = load(path).unwrap_or(0);
    if score <= current {
        return Ok(false);
    }
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(&HighScoreRecord { score })?;
    fs::write(path, json)?;
    log::info!("New high score {} saved to {:?}", score, path);
    Ok(true)
}
