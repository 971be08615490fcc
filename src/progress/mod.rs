//! Progress checkpoint persistence for interrupted transcriptions.
//!
//! One JSON record per audio input, keyed by the input file's stem. Written
//! when a run is interrupted, removed after a later successful run of the
//! same input. Inputs from different directories that share a stem also
//! share a record path; accepted limitation.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::types::ModelSize;

/// Status literal carried by every checkpoint record.
pub const STATUS_INTERRUPTED: &str = "interrupted";

/// Placeholder stored when an interruption arrives before any text is produced.
pub const NO_PARTIAL_TEXT: &str = "Transcription interrupted - no partial text available";

/// Persisted snapshot of an interrupted run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub audio_file: String,
    pub model_size: String,
    pub partial_text: String,
    pub timestamp: DateTime<Utc>,
    pub status: String,
}

impl ProgressRecord {
    /// Create a record for an interruption observed now.
    pub fn interrupted(audio_file: &Path, model_size: ModelSize, partial_text: String) -> Self {
        Self {
            audio_file: audio_file.to_string_lossy().to_string(),
            model_size: model_size.to_string(),
            partial_text,
            timestamp: Utc::now(),
            status: STATUS_INTERRUPTED.to_string(),
        }
    }
}

/// Derive the record path for an audio input: `<output_dir>/<stem>_progress.json`.
pub fn progress_path(output_dir: &Path, audio_file: &Path) -> PathBuf {
    let stem = audio_file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "audio".to_string());
    output_dir.join(format!("{}_progress.json", stem))
}

/// Write a record, overwriting any prior one at `path`.
///
/// The parent directory is created first so a missing `output/` is not a
/// write failure.
pub fn save_record(path: &Path, record: &ProgressRecord) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
    }

    let content =
        serde_json::to_string_pretty(record).context("Failed to serialize progress record")?;

    fs::write(path, &content)
        .with_context(|| format!("Failed to write progress file: {}", path.display()))?;

    Ok(())
}

/// Read and validate a record.
pub fn load_record(path: &Path) -> Result<ProgressRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read progress file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse progress file: {}", path.display()))
}

/// Remove a stale record if one exists. Returns whether a file was removed.
pub fn remove_stale_record(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path)
        .with_context(|| format!("Failed to remove progress file: {}", path.display()))?;

    Ok(true)
}
