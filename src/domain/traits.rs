//! Core domain traits for dependency inversion.
//!
//! These traits define contracts between layers without depending on
//! concrete implementations. They enable:
//! - Testability via mock implementations
//! - Flexibility to swap implementations
//! - Clear API boundaries

use anyhow::Result;

use crate::domain::types::TranscriptionOutcome;
use crate::interrupt::CancelToken;

/// Speech-to-text transcription abstraction.
///
/// Implementors convert audio samples to text using a loaded STT model.
pub trait Transcription: Send + Sync {
    /// Transcribe audio samples to text.
    ///
    /// # Arguments
    /// * `samples` - Audio samples at 16kHz mono
    /// * `language` - Language code (e.g., "en"), or `None` for auto-detection
    fn transcribe(&self, samples: &[f32], language: Option<&str>) -> Result<String>;

    /// Transcribe with cooperative cancellation.
    ///
    /// The token is polled at whatever checkpoints the backend exposes;
    /// an interrupted run reports the text produced up to the abort point.
    fn transcribe_cancellable(
        &self,
        samples: &[f32],
        language: Option<&str>,
        cancel: &CancelToken,
    ) -> Result<TranscriptionOutcome>;

    /// Check if a model is loaded and ready for transcription.
    fn is_loaded(&self) -> bool;

    /// Get the name/path of the loaded model.
    fn model_name(&self) -> Option<String>;
}
