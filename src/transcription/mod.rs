pub mod service;
pub mod whisper;

pub use service::TranscriptionService;
pub use whisper::WhisperSTT;
