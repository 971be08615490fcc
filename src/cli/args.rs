//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::domain::types::ModelSize;

/// Audio to Text - Convert audio files to text using Whisper
#[derive(Parser)]
#[command(name = "audio-to-text")]
#[command(about = "Convert audio files to text using Whisper", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the audio file to transcribe
    #[arg(required_unless_present = "show_progress")]
    pub audio_file: Option<PathBuf>,

    /// Whisper model size (default: base). Larger models are more accurate but slower.
    #[arg(short, long, value_enum)]
    pub model: Option<ModelSize>,

    /// Output file path to save the transcription
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show saved progress from an interrupted transcription
    #[arg(long, value_name = "PROGRESS_FILE")]
    pub show_progress: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_audio_file_required_without_show_progress() {
        let result = Cli::try_parse_from(["audio-to-text"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_show_progress_alone_is_accepted() {
        let cli = Cli::try_parse_from(["audio-to-text", "--show-progress", "output/x.json"])
            .expect("parse");
        assert!(cli.audio_file.is_none());
        assert_eq!(cli.show_progress, Some(PathBuf::from("output/x.json")));
    }

    #[test]
    fn test_model_enum_values() {
        let cli =
            Cli::try_parse_from(["audio-to-text", "a.wav", "--model", "large"]).expect("parse");
        assert_eq!(cli.model, Some(ModelSize::Large));

        let result = Cli::try_parse_from(["audio-to-text", "a.wav", "--model", "huge"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["audio-to-text", "a.wav", "-m", "tiny", "-o", "out.txt"])
            .expect("parse");
        assert_eq!(cli.model, Some(ModelSize::Tiny));
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
    }
}
