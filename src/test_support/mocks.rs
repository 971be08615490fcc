//! Mock implementations for unit testing.
//!
//! These mocks implement `crate::domain::traits::Transcription` to enable
//! testing the driver without a real Whisper model.

use anyhow::{bail, Result};

use crate::domain::traits::Transcription;
use crate::domain::types::TranscriptionOutcome;
use crate::interrupt::CancelToken;

/// Mock transcription backend returning a scripted outcome.
pub struct MockTranscription {
    outcome: TranscriptionOutcome,
}

impl MockTranscription {
    /// Mock that completes cleanly with the given text.
    pub fn completing(text: &str) -> Self {
        Self {
            outcome: TranscriptionOutcome::Completed(text.to_string()),
        }
    }

    /// Mock that reports an interruption with the given partial text
    /// (empty = nothing salvaged).
    pub fn interrupting(partial: &str) -> Self {
        Self {
            outcome: TranscriptionOutcome::Interrupted {
                partial: partial.to_string(),
            },
        }
    }
}

impl Transcription for MockTranscription {
    fn transcribe(&self, _samples: &[f32], _language: Option<&str>) -> Result<String> {
        match &self.outcome {
            TranscriptionOutcome::Completed(text) => Ok(text.clone()),
            TranscriptionOutcome::Interrupted { partial } => Ok(partial.clone()),
        }
    }

    fn transcribe_cancellable(
        &self,
        _samples: &[f32],
        _language: Option<&str>,
        _cancel: &CancelToken,
    ) -> Result<TranscriptionOutcome> {
        Ok(self.outcome.clone())
    }

    fn is_loaded(&self) -> bool {
        true
    }

    fn model_name(&self) -> Option<String> {
        Some("mock".to_string())
    }
}

/// Mock transcription backend that always fails.
pub struct FailingTranscription;

impl Transcription for FailingTranscription {
    fn transcribe(&self, _samples: &[f32], _language: Option<&str>) -> Result<String> {
        bail!("mock transcription failure")
    }

    fn transcribe_cancellable(
        &self,
        _samples: &[f32],
        _language: Option<&str>,
        _cancel: &CancelToken,
    ) -> Result<TranscriptionOutcome> {
        bail!("mock transcription failure")
    }

    fn is_loaded(&self) -> bool {
        false
    }

    fn model_name(&self) -> Option<String> {
        None
    }
}
