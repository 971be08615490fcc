//! Transcription service layer.
//!
//! Provides a unified interface for speech-to-text transcription
//! using Whisper, abstracting away model loading and lifecycle.

use anyhow::{Context, Result};

use crate::domain::traits::Transcription;
use crate::domain::types::TranscriptionOutcome;
use crate::interrupt::CancelToken;
use crate::transcription::whisper::WhisperSTT;

/// Unified transcription service wrapping Whisper.
pub struct TranscriptionService {
    whisper: Option<WhisperSTT>,
}

impl TranscriptionService {
    /// Create a new TranscriptionService without a loaded model.
    pub fn new() -> Self {
        Self { whisper: None }
    }

    /// Create a new TranscriptionService with a pre-loaded model.
    pub fn with_model(model_path: &str) -> Result<Self> {
        let whisper = WhisperSTT::new(model_path)?;
        Ok(Self {
            whisper: Some(whisper),
        })
    }
}

impl Default for TranscriptionService {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcription for TranscriptionService {
    fn transcribe(&self, samples: &[f32], language: Option<&str>) -> Result<String> {
        let whisper = self.whisper.as_ref().context("Model not loaded")?;
        whisper.transcribe(samples, language)
    }

    fn transcribe_cancellable(
        &self,
        samples: &[f32],
        language: Option<&str>,
        cancel: &CancelToken,
    ) -> Result<TranscriptionOutcome> {
        let whisper = self.whisper.as_ref().context("Model not loaded")?;
        whisper.transcribe_cancellable(samples, language, cancel)
    }

    fn is_loaded(&self) -> bool {
        self.whisper.is_some()
    }

    fn model_name(&self) -> Option<String> {
        self.whisper.as_ref().and_then(Transcription::model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_unloaded_service() {
        let service = TranscriptionService::new();
        assert!(!service.is_loaded());
    }

    #[test]
    fn test_default_creates_unloaded_service() {
        let service = TranscriptionService::default();
        assert!(!service.is_loaded());
    }

    #[test]
    fn test_transcribe_fails_when_no_model() {
        let service = TranscriptionService::new();
        let result = service.transcribe(&[0.0; 100], None);
        assert!(result.is_err());
    }

    #[test]
    fn test_cancellable_transcribe_fails_when_no_model() {
        let service = TranscriptionService::new();
        let cancel = CancelToken::new();
        let result = service.transcribe_cancellable(&[0.0; 100], Some("en"), &cancel);
        assert!(result.is_err());
    }

    #[test]
    fn test_model_name_none_when_unloaded() {
        let service = TranscriptionService::new();
        assert!(service.model_name().is_none());
    }
}
