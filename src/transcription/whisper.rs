use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use whisper_rs::{
    FullParams, SamplingStrategy, SegmentCallbackData, WhisperContext, WhisperContextParameters,
};

use crate::domain::traits::Transcription;
use crate::domain::types::TranscriptionOutcome;
use crate::interrupt::CancelToken;

pub struct WhisperSTT {
    ctx: WhisperContext,
    model_path: String,
}

impl WhisperSTT {
    pub fn new(model_path: &str) -> Result<Self> {
        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .context("Failed to load Whisper model")?;

        Ok(Self {
            ctx,
            model_path: model_path.to_string(),
        })
    }

    pub fn transcribe(&self, samples: &[f32], language: Option<&str>) -> Result<String> {
        // A fresh token is never cancelled, so the call runs to completion.
        match self.transcribe_cancellable(samples, language, &CancelToken::new())? {
            TranscriptionOutcome::Completed(text) => Ok(text),
            TranscriptionOutcome::Interrupted { partial } => Ok(partial),
        }
    }

    /// Transcribe with cooperative cancellation.
    ///
    /// whisper.cpp polls the token between decoder batches through the abort
    /// callback, so cancellation takes effect at the next model checkpoint,
    /// not instantly. Segments emitted before the abort are collected through
    /// the segment callback, so an interrupted run still yields the text
    /// transcribed so far.
    pub fn transcribe_cancellable(
        &self,
        samples: &[f32],
        language: Option<&str>,
        cancel: &CancelToken,
    ) -> Result<TranscriptionOutcome> {
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        if let Some(lang) = language {
            params.set_language(Some(lang));
        }

        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_translate(false);

        let collected = Arc::new(Mutex::new(String::new()));
        {
            let collected = collected.clone();
            params.set_segment_callback_safe(move |segment: SegmentCallbackData| {
                let mut text = collected.lock();
                text.push_str(&segment.text);
                text.push(' ');
            });
        }
        {
            let cancel = cancel.clone();
            params.set_abort_callback_safe(move || cancel.is_cancelled());
        }

        let mut state = self.ctx.create_state()?;
        match state.full(params, samples) {
            Ok(_) => {}
            Err(_) if cancel.is_cancelled() => {
                let partial = collected.lock().trim().to_string();
                return Ok(TranscriptionOutcome::Interrupted { partial });
            }
            Err(e) => return Err(e).context("Transcription failed"),
        }

        let num_segments = state.full_n_segments()?;
        let mut text = String::new();

        for i in 0..num_segments {
            if let Ok(segment) = state.full_get_segment_text(i) {
                text.push_str(&segment);
                text.push(' ');
            }
        }

        let text = text.trim().to_string();

        // An interrupt that lands between the last batch and completion loses
        // the race; the run is still reported as interrupted, with full text.
        if cancel.is_cancelled() {
            return Ok(TranscriptionOutcome::Interrupted { partial: text });
        }

        Ok(TranscriptionOutcome::Completed(text))
    }
}

impl Transcription for WhisperSTT {
    fn transcribe(&self, samples: &[f32], language: Option<&str>) -> Result<String> {
        WhisperSTT::transcribe(self, samples, language)
    }

    fn transcribe_cancellable(
        &self,
        samples: &[f32],
        language: Option<&str>,
        cancel: &CancelToken,
    ) -> Result<TranscriptionOutcome> {
        WhisperSTT::transcribe_cancellable(self, samples, language, cancel)
    }

    fn is_loaded(&self) -> bool {
        true
    }

    fn model_name(&self) -> Option<String> {
        Path::new(&self.model_path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
    }
}
