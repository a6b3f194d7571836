use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::speech::domain::transcript::RecognitionResult;
use crate::subtitles::domain::subtitle_entry::SubtitleEntry;
use crate::subtitles::domain::subtitle_writer::{SubtitleWriter, WriteError};

/// Writes SubRip files block by block through a buffered file handle.
///
/// The handle is closed on every exit path when the writer is dropped. A
/// failure part way through leaves the blocks written so far on disk.
#[derive(Debug, Default)]
pub struct SrtFileWriter;

impl SrtFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SubtitleWriter for SrtFileWriter {
    fn write(&self, results: &[RecognitionResult], path: &Path) -> Result<usize, WriteError> {
        let write_err = |e| WriteError::Write {
            path: path.to_path_buf(),
            source: e,
        };

        let file = File::create(path).map_err(|e| WriteError::Create {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut out = BufWriter::new(file);

        let entries = SubtitleEntry::from_results(results);
        for entry in &entries {
            out.write_all(entry.to_srt_block().as_bytes())
                .map_err(write_err)?;
        }
        out.flush().map_err(write_err)?;

        log::debug!("Wrote {} subtitle entries to {}", entries.len(), path.display());
        Ok(entries.len())
    }
}
