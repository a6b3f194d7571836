use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::speech::domain::transcript::RecognitionResult;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Domain interface for persisting a transcript as subtitles.
pub trait SubtitleWriter: Send {
    /// Create or truncate `path` and write the subtitles for `results`.
    /// Returns the number of entries written.
    fn write(&self, results: &[RecognitionResult], path: &Path) -> Result<usize, WriteError>;
}
