//! Whisper model catalog and download management.
//!
//! Model weights live in the shared whisper data directory. A variant that
//! has not been downloaded yet is fetched from HuggingFace on first use,
//! streamed to a temp file, checksum-verified, and renamed into place.

use anyhow::{bail, Context, Result};
use futures_util::StreamExt;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::app::config::models_dir;
use crate::domain::types::ModelSize;

const HUGGINGFACE_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/";

#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub filename: String,
    pub display_name: String,
    pub size_bytes: u64,
    pub description: String,
    pub sha256: Option<String>,
}

/// Validates that a model filename is safe (no path traversal).
///
/// Rejects filenames containing path separators or `..` sequences.
fn sanitize_model_filename(filename: &str) -> Result<()> {
    if filename.is_empty() {
        bail!("Model filename cannot be empty");
    }
    if filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
        || filename.contains('\0')
    {
        bail!("Invalid model filename: {}", filename);
    }
    Ok(())
}

fn verify_checksum(path: &Path, expected: &str) -> Result<()> {
    let mut file = fs::File::open(path)
        .with_context(|| format!("Failed to open file for verification: {}", path.display()))?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher).context("Failed to compute checksum")?;
    let hash = format!("{:x}", hasher.finalize());
    if hash != expected {
        bail!(
            "Checksum mismatch for {}: expected {}, got {}",
            path.display(),
            expected,
            hash
        );
    }
    Ok(())
}

pub fn get_available_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo {
            filename: "ggml-tiny.bin".to_string(),
            display_name: "Tiny".to_string(),
            size_bytes: 77_691_713,
            description: "Fastest, least accurate".to_string(),
            sha256: Some(
                "be07e048e1e599ad46341c8d2a135645097a538221678b7acdd1b1919c6e1b21".to_string(),
            ),
        },
        ModelInfo {
            filename: "ggml-base.bin".to_string(),
            display_name: "Base".to_string(),
            size_bytes: 147_951_465,
            description: "Balanced speed and accuracy".to_string(),
            sha256: Some(
                "60ed5bc3dd14eea856493d334349b405782ddcaf0028d4b5df4088345fba2efe".to_string(),
            ),
        },
        ModelInfo {
            filename: "ggml-small.bin".to_string(),
            display_name: "Small".to_string(),
            size_bytes: 487_601_967,
            description: "Good accuracy".to_string(),
            sha256: Some(
                "1be3a9b2063867b937e64e2ec7483364a79917e157fa98c5d94b5c1fffea987b".to_string(),
            ),
        },
        ModelInfo {
            filename: "ggml-medium.bin".to_string(),
            display_name: "Medium".to_string(),
            size_bytes: 1_533_763_059,
            description: "High accuracy".to_string(),
            sha256: Some(
                "6c14d5adee5f86394037b4e4e8b59f1673b6cee10e3cf0b11bbdbee79c156208".to_string(),
            ),
        },
        ModelInfo {
            filename: "ggml-large-v3.bin".to_string(),
            display_name: "Large v3".to_string(),
            size_bytes: 3_095_033_483,
            description: "Highest accuracy".to_string(),
            sha256: Some(
                "64d182b440b98d5203c4f9bd541544d84c605196c4f7b845dfa11fb23594d1e2".to_string(),
            ),
        },
    ]
}

/// Catalog entry for a model-size variant.
pub fn model_info(size: ModelSize) -> ModelInfo {
    let filename = size.model_filename();
    get_available_models()
        .into_iter()
        .find(|m| m.filename == filename)
        // Every variant has a catalog entry; the fallback keeps the lookup total.
        .unwrap_or(ModelInfo {
            filename: filename.to_string(),
            display_name: size.to_string(),
            size_bytes: 0,
            description: String::new(),
            sha256: None,
        })
}

pub fn get_model_path(filename: &str) -> PathBuf {
    models_dir().join(filename)
}

pub fn is_model_downloaded(size: ModelSize) -> bool {
    get_model_path(size.model_filename()).exists()
}

/// Resolve the weight file for a variant, downloading it if missing.
pub fn ensure_model(size: ModelSize) -> Result<PathBuf> {
    let info = model_info(size);
    let path = get_model_path(&info.filename);
    if path.exists() {
        return Ok(path);
    }

    eprintln!(
        "Model '{}' not found locally, downloading {} ({})...",
        size,
        info.filename,
        format_size(info.size_bytes)
    );

    let runtime = tokio::runtime::Runtime::new().context("Failed to start download runtime")?;
    runtime.block_on(download_model(&info.filename, |downloaded, total| {
        if total > 0 {
            eprint!("\rDownloading: {}%", downloaded * 100 / total);
        }
    }))?;
    eprintln!();
    eprintln!("Model downloaded: {}", path.display());

    Ok(path)
}

/// Download model weights with progress reporting, checksum verification,
/// and atomic rename from temp to final path.
pub async fn download_model<F>(filename: &str, progress_callback: F) -> Result<()>
where
    F: Fn(u64, u64) + Send + Sync + 'static,
{
    sanitize_model_filename(filename)?;

    let expected_sha256 = get_available_models()
        .iter()
        .find(|m| m.filename == filename)
        .and_then(|m| m.sha256.clone());

    if expected_sha256.is_none() {
        eprintln!(
            "Warning: no known checksum for {}, skipping verification",
            filename
        );
    }

    let url = format!("{}{}", HUGGINGFACE_BASE_URL, filename);
    let dir = models_dir();

    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let temp_path = dir.join(format!("{}.downloading", filename));
    let final_path = dir.join(filename);

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Failed to connect: {}", url))?;

    if !response.status().is_success() {
        bail!("Download failed for {}: HTTP {}", filename, response.status());
    }

    let total_size = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let mut file = fs::File::create(&temp_path)
        .with_context(|| format!("Failed to create file: {}", temp_path.display()))?;

    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Download stream error")?;
        file.write_all(&chunk).context("Failed to write data")?;

        downloaded += chunk.len() as u64;
        progress_callback(downloaded, total_size);
    }

    drop(file);

    if let Some(expected) = expected_sha256 {
        if let Err(e) = verify_checksum(&temp_path, &expected) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
    }

    fs::rename(&temp_path, &final_path).with_context(|| {
        format!(
            "Failed to rename {} -> {}",
            temp_path.display(),
            final_path.display()
        )
    })?;

    Ok(())
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} B", bytes)
    }
}
