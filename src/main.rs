use clap::Parser;
use std::process;

use audio_to_text::cli::transcribe::TranscribeOutcome;
use audio_to_text::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    if let Some(ref path) = cli.show_progress {
        cli::progress_cmd::run(path);
        return;
    }

    match cli::transcribe::run(&cli) {
        Ok(TranscribeOutcome::Completed { .. }) => {
            println!();
            println!("Transcription completed successfully!");
        }
        // Partial text was salvaged and checkpointed; degraded success.
        Ok(TranscribeOutcome::Interrupted { partial: Some(_) }) => {}
        Ok(TranscribeOutcome::Interrupted { partial: None }) => process::exit(1),
        Err(e) => {
            eprintln!("Error during transcription: {:#}", e);
            process::exit(1);
        }
    }
}
