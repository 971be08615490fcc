//! Display of saved progress from an interrupted transcription.

use std::path::Path;

use crate::progress::{self, ProgressRecord};

/// Show a saved progress record.
///
/// Display-only: read errors are printed, never returned, and the file is
/// never mutated. The process exits 0 regardless.
pub fn run(path: &Path) {
    if !path.exists() {
        println!("Progress file not found: {}", path.display());
        return;
    }

    match progress::load_record(path) {
        Ok(record) => print_record(&record),
        Err(e) => eprintln!("Failed to read progress: {}", e),
    }
}

fn print_record(record: &ProgressRecord) {
    let rule = "=".repeat(50);
    println!();
    println!("{}", rule);
    println!("SAVED PROGRESS");
    println!("{}", rule);
    println!("Audio file: {}", record.audio_file);
    println!("Model: {}", record.model_size);
    println!("Timestamp: {}", record.timestamp.to_rfc3339());
    println!("Status: {}", record.status);
    println!();
    println!("Partial text:");
    println!("{}", "-".repeat(30));
    println!("{}", record.partial_text);
    println!("{}", "-".repeat(30));
}
