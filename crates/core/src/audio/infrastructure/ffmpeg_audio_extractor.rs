use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::audio::domain::audio_extractor::{AudioExtractor, ExtractionError};
use crate::shared::constants::{FFMPEG_PROGRAM, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE};

/// Lines of ffmpeg stderr kept in the error when the process fails.
const STDERR_TAIL_LINES: usize = 5;

/// Extracts audio by running the `ffmpeg` binary as a child process.
///
/// The best-quality audio stream is selected, video is dropped, and the
/// result is written as mono 16 kHz signed 16-bit PCM, overwriting the
/// destination unconditionally.
#[derive(Debug, Clone)]
pub struct FfmpegAudioExtractor {
    program: PathBuf,
}

impl FfmpegAudioExtractor {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(FFMPEG_PROGRAM),
        }
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn arguments(video: &Path, audio: &Path) -> Vec<OsString> {
        let channels = SPEECH_CHANNELS.to_string();
        let sample_rate = SPEECH_SAMPLE_RATE.to_string();
        vec![
            "-y".into(),
            "-i".into(),
            video.into(),
            "-q:a".into(),
            "0".into(),
            "-vn".into(),
            "-ac".into(),
            channels.into(),
            "-ar".into(),
            sample_rate.into(),
            "-c:a".into(),
            "pcm_s16le".into(),
            audio.into(),
        ]
    }
}

impl Default for FfmpegAudioExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioExtractor for FfmpegAudioExtractor {
    fn extract(&self, video: &Path, audio: &Path) -> Result<(), ExtractionError> {
        let program = self.program.display().to_string();
        log::debug!(
            "Running {program} to extract {} -> {}",
            video.display(),
            audio.display()
        );

        let output = Command::new(&self.program)
            .args(Self::arguments(video, audio))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ExtractionError::Spawn {
                program: program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ExtractionError::Failed {
                program,
                status: output.status.to_string(),
                stderr: stderr_tail(&output.stderr),
            });
        }

        Ok(())
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join(" | ")
}
