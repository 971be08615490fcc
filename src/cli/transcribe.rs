//! CLI transcription command implementation.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::config::{load_config, Config};
use crate::cli::args::Cli;
use crate::cli::wav_reader::{prepare_for_whisper, read_wav};
use crate::domain::traits::Transcription;
use crate::domain::types::{ModelSize, TranscriptionOutcome};
use crate::infrastructure::models;
use crate::interrupt::{self, CancelToken};
use crate::progress::{self, ProgressRecord, NO_PARTIAL_TEXT};
use crate::transcription::TranscriptionService;

const RULE_WIDTH: usize = 50;

/// What the driver reports back to the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscribeOutcome {
    /// Clean completion; transcript printed and optionally written.
    Completed { text: String },
    /// Interrupted; `partial` is `Some` when text was salvaged.
    Interrupted { partial: Option<String> },
}

/// Request state shared by the completion and interruption handlers.
struct RequestContext<'a> {
    audio_path: &'a Path,
    model_size: ModelSize,
    output_path: Option<&'a Path>,
    progress_file: PathBuf,
}

/// Run the transcribe command.
pub fn run(cli: &Cli) -> Result<TranscribeOutcome> {
    // 1. Load config (defaults when absent or unreadable)
    let config = load_config().unwrap_or_default();

    let audio_path = cli
        .audio_file
        .as_deref()
        .context("audio file is required unless --show-progress is given")?;

    if !audio_path.exists() {
        bail!("Audio file not found: {}", audio_path.display());
    }

    // 2. Resolve the model, downloading it on first use
    let model_size = cli.model.unwrap_or(config.default_model);
    let model_path = models::ensure_model(model_size)?;

    // 3. Read and prepare the audio
    eprintln!("Reading: {}", audio_path.display());
    let audio = read_wav(audio_path)?;
    eprintln!(
        "  {} channels, {}Hz, {:.1}s",
        audio.channels, audio.sample_rate, audio.duration_secs
    );
    let samples = prepare_for_whisper(&audio)?;

    // 4. Load the model
    eprintln!("Loading Whisper model '{}': {}", model_size, model_path.display());
    let service = TranscriptionService::with_model(&model_path.to_string_lossy())?;

    // 5. Arm the interrupt handler before the blocking model call
    let cancel = CancelToken::new();
    interrupt::install_handler(&cancel)?;

    eprintln!("Transcribing: {}", audio_path.display());
    eprintln!("This may take a while depending on the audio length and model size...");
    eprintln!("Press Ctrl+C to interrupt; progress will be saved automatically.");

    let ctx = RequestContext {
        audio_path,
        model_size,
        output_path: cli.output.as_deref(),
        progress_file: progress::progress_path(&config.output_dir, audio_path),
    };

    transcribe_and_handle(&service, &samples, language_option(&config), &cancel, &ctx)
}

/// Map the configured language to Whisper's parameter ("auto" = detect).
fn language_option(config: &Config) -> Option<&str> {
    if config.language == "auto" {
        None
    } else {
        Some(config.language.as_str())
    }
}

/// Invoke the model and apply completion/interruption handling.
fn transcribe_and_handle(
    service: &dyn Transcription,
    samples: &[f32],
    language: Option<&str>,
    cancel: &CancelToken,
    ctx: &RequestContext,
) -> Result<TranscribeOutcome> {
    match service.transcribe_cancellable(samples, language, cancel)? {
        TranscriptionOutcome::Completed(text) => finish_completed(text, ctx),
        TranscriptionOutcome::Interrupted { partial } => checkpoint_interrupted(partial, ctx),
    }
}

/// Clean completion: print, optionally persist, drop any stale checkpoint.
fn finish_completed(text: String, ctx: &RequestContext) -> Result<TranscribeOutcome> {
    print_framed("TRANSCRIPTION RESULT:", &text);

    if let Some(output_path) = ctx.output_path {
        fs::write(output_path, &text)
            .with_context(|| format!("Failed to write output: {}", output_path.display()))?;
        eprintln!("Transcription saved to: {}", output_path.display());
    }

    if progress::remove_stale_record(&ctx.progress_file)? {
        eprintln!("Progress file removed (transcription completed)");
    }

    Ok(TranscribeOutcome::Completed { text })
}

/// Interruption: checkpoint whatever was salvaged, then report it.
///
/// The record save is best-effort; a failed save must not mask the
/// interruption itself.
fn checkpoint_interrupted(partial: String, ctx: &RequestContext) -> Result<TranscribeOutcome> {
    let salvaged = !partial.trim().is_empty();
    let text = if salvaged {
        partial.trim().to_string()
    } else {
        NO_PARTIAL_TEXT.to_string()
    };

    let record = ProgressRecord::interrupted(ctx.audio_path, ctx.model_size, text.clone());
    match progress::save_record(&ctx.progress_file, &record) {
        Ok(()) => eprintln!("Progress saved to: {}", ctx.progress_file.display()),
        Err(e) => eprintln!("Failed to save progress: {}", e),
    }

    if salvaged {
        print_framed("TEXT TRANSCRIBED UP TO INTERRUPTION:", &text);
        Ok(TranscribeOutcome::Interrupted {
            partial: Some(text),
        })
    } else {
        eprintln!("No partial text was available at interruption");
        Ok(TranscribeOutcome::Interrupted { partial: None })
    }
}

fn print_framed(header: &str, text: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!();
    println!("{}", rule);
    println!("{}", header);
    println!("{}", rule);
    println!("{}", text);
    println!("{}", rule);
}
