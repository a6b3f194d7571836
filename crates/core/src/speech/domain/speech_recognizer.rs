use thiserror::Error;

use super::transcript::RecognitionResult;

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("failed to read audio from {path}: {source}")]
    ReadAudio {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no speech service credentials configured")]
    MissingCredentials,
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("speech service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("invalid response from speech service: {0}")]
    InvalidResponse(String),
}

/// Domain interface for speech-to-text transcription.
///
/// Implementations receive the full contents of the audio artifact and return
/// the recognition results in the order the service produced them.
pub trait SpeechRecognizer: Send {
    fn recognize(&self, audio: &[u8]) -> Result<Vec<RecognitionResult>, TranscriptionError>;
}
