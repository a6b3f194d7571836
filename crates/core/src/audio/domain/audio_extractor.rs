use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("audio artifact was not created at {0}")]
    MissingArtifact(PathBuf),
    #[error("failed to inspect audio artifact {path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("audio artifact {0} is empty")]
    EmptyArtifact(PathBuf),
    #[error("audio artifact {path} has unexpected format: {detail}")]
    UnexpectedFormat { path: PathBuf, detail: String },
}

/// Domain interface for pulling the audio track out of a video file.
pub trait AudioExtractor: Send {
    /// Write the audio of `video` to `audio` as mono 16 kHz PCM WAV,
    /// overwriting any existing file.
    fn extract(&self, video: &Path, audio: &Path) -> Result<(), ExtractionError>;
}
