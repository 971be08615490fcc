//! Integration test: ProgressRecord persistence round-trip.
//!
//! Verifies that a checkpoint record can be serialized to JSON, written to
//! disk, loaded back, and all fields are preserved verbatim. Also covers
//! path derivation, the overwrite invariant, and stale-record removal.

use std::fs;
use std::path::Path;

use audio_to_text::domain::types::ModelSize;
use audio_to_text::progress::{
    load_record, progress_path, remove_stale_record, save_record, ProgressRecord, NO_PARTIAL_TEXT,
    STATUS_INTERRUPTED,
};

/// Full round-trip: build record → JSON file → load → verify every field.
#[test]
fn progress_record_roundtrip() {
    let dir = std::env::temp_dir().join("a2t_integ_progress_rt");
    let _ = fs::create_dir_all(&dir);
    let path = progress_path(&dir, Path::new("recordings/sample.mp3"));
    assert!(path.to_string_lossy().ends_with("sample_progress.json"));

    let record = ProgressRecord::interrupted(
        Path::new("recordings/sample.mp3"),
        ModelSize::Medium,
        "UTF-8 partial text: їжак, ґanok, naïve".to_string(),
    );
    save_record(&path, &record).expect("save");

    let loaded = load_record(&path).expect("load");
    assert_eq!(loaded.audio_file, "recordings/sample.mp3");
    assert_eq!(loaded.model_size, "medium");
    assert_eq!(loaded.partial_text, record.partial_text);
    assert_eq!(loaded.timestamp, record.timestamp);
    assert_eq!(loaded.status, STATUS_INTERRUPTED);

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir(&dir);
}

/// The raw file is pretty JSON with an ISO-8601 timestamp and the fixed
/// status literal.
#[test]
fn progress_record_file_format() {
    let dir = std::env::temp_dir().join("a2t_integ_progress_format");
    let _ = fs::create_dir_all(&dir);
    let path = progress_path(&dir, Path::new("talk.wav"));

    let record =
        ProgressRecord::interrupted(Path::new("talk.wav"), ModelSize::Base, "text".to_string());
    save_record(&path, &record).expect("save");

    let raw = fs::read_to_string(&path).expect("read");
    // 2-space indented keys
    assert!(raw.contains("\n  \"audio_file\""));
    assert!(raw.contains("\"status\": \"interrupted\""));

    // Timestamp field holds an ISO-8601 string
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid JSON");
    let ts = value["timestamp"].as_str().expect("timestamp is a string");
    assert!(ts.contains('T'), "ISO-8601 timestamp expected: {}", ts);
    ts.parse::<chrono::DateTime<chrono::Utc>>()
        .expect("timestamp parses back");

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir(&dir);
}

/// At most one record per audio base-name: a second save overwrites.
#[test]
fn progress_record_overwrites_prior() {
    let dir = std::env::temp_dir().join("a2t_integ_progress_overwrite");
    let _ = fs::create_dir_all(&dir);
    let audio = Path::new("sample.wav");
    let path = progress_path(&dir, audio);

    let first = ProgressRecord::interrupted(audio, ModelSize::Tiny, "first".to_string());
    save_record(&path, &first).expect("save first");

    let second = ProgressRecord::interrupted(audio, ModelSize::Large, "second".to_string());
    save_record(&path, &second).expect("save second");

    let loaded = load_record(&path).expect("load");
    assert_eq!(loaded.partial_text, "second");
    assert_eq!(loaded.model_size, "large");

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir(&dir);
}

/// Inputs with the same stem from different directories share a record path.
#[test]
fn progress_path_ignores_input_directory() {
    let out = Path::new("output");
    assert_eq!(
        progress_path(out, Path::new("a/interview.wav")),
        progress_path(out, Path::new("b/interview.wav"))
    );
}

/// The placeholder record round-trips like any other.
#[test]
fn placeholder_record_roundtrip() {
    let dir = std::env::temp_dir().join("a2t_integ_progress_placeholder");
    let _ = fs::create_dir_all(&dir);
    let audio = Path::new("silent.wav");
    let path = progress_path(&dir, audio);

    let record = ProgressRecord::interrupted(audio, ModelSize::Base, NO_PARTIAL_TEXT.to_string());
    save_record(&path, &record).expect("save");

    let loaded = load_record(&path).expect("load");
    assert_eq!(loaded.partial_text, NO_PARTIAL_TEXT);
    assert_eq!(loaded.status, STATUS_INTERRUPTED);

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir(&dir);
}

/// Removal after success: present → removed → no-op.
#[test]
fn stale_record_removal() {
    let dir = std::env::temp_dir().join("a2t_integ_progress_removal");
    let _ = fs::create_dir_all(&dir);
    let audio = Path::new("sample.wav");
    let path = progress_path(&dir, audio);

    let record = ProgressRecord::interrupted(audio, ModelSize::Base, "x".to_string());
    save_record(&path, &record).expect("save");

    assert!(remove_stale_record(&path).expect("remove"));
    assert!(!path.exists());
    assert!(!remove_stale_record(&path).expect("second remove is a no-op"));

    let _ = fs::remove_dir(&dir);
}

/// save_record creates the output directory on demand.
#[test]
fn save_creates_output_directory() {
    let dir = std::env::temp_dir().join("a2t_integ_progress_mkdir");
    let _ = fs::remove_dir_all(&dir);
    assert!(!dir.exists());

    let audio = Path::new("sample.wav");
    let path = progress_path(&dir, audio);
    let record = ProgressRecord::interrupted(audio, ModelSize::Base, "x".to_string());
    save_record(&path, &record).expect("save into missing dir");
    assert!(path.exists());

    let _ = fs::remove_dir_all(&dir);
}
