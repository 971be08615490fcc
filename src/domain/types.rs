//! Shared domain types.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whisper model variant, trading inference speed for accuracy.
///
/// Larger variants are more accurate but load slower and use more memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    /// Fastest, least accurate
    Tiny,
    /// Balanced speed and accuracy (default)
    #[default]
    Base,
    /// Good accuracy
    Small,
    /// High accuracy
    Medium,
    /// Highest accuracy, slowest
    Large,
}

impl ModelSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    /// ggml weight file for this variant ("large" maps to the v3 weights).
    pub fn model_filename(self) -> &'static str {
        match self {
            ModelSize::Tiny => "ggml-tiny.bin",
            ModelSize::Base => "ggml-base.bin",
            ModelSize::Small => "ggml-small.bin",
            ModelSize::Medium => "ggml-medium.bin",
            ModelSize::Large => "ggml-large-v3.bin",
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a cancellable transcription call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionOutcome {
    /// The model ran to completion.
    Completed(String),
    /// The run was interrupted; `partial` holds the segments produced
    /// before the abort (possibly empty).
    Interrupted { partial: String },
}
