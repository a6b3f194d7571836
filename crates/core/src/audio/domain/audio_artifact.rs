use std::path::Path;
use std::time::Duration;

use hound::{SampleFormat, WavReader};

use super::audio_extractor::ExtractionError;
use crate::shared::constants::{SPEECH_BITS_PER_SAMPLE, SPEECH_CHANNELS, SPEECH_SAMPLE_RATE};

/// What a verified audio artifact holds.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioArtifact {
    pub size_bytes: u64,
    pub duration: Duration,
}

/// Check that the extracted artifact exists, is non-empty and is the mono
/// 16 kHz 16-bit PCM WAV that the recognizer is told to expect.
pub fn verify(path: &Path) -> Result<AudioArtifact, ExtractionError> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ExtractionError::MissingArtifact(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ExtractionError::Inspect {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if metadata.len() == 0 {
        return Err(ExtractionError::EmptyArtifact(path.to_path_buf()));
    }

    let unexpected = |detail: String| ExtractionError::UnexpectedFormat {
        path: path.to_path_buf(),
        detail,
    };

    let reader = WavReader::open(path).map_err(|e| unexpected(e.to_string()))?;
    let spec = reader.spec();

    if spec.channels != SPEECH_CHANNELS {
        return Err(unexpected(format!("{} channels", spec.channels)));
    }
    if spec.sample_rate != SPEECH_SAMPLE_RATE {
        return Err(unexpected(format!("{} Hz", spec.sample_rate)));
    }
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != SPEECH_BITS_PER_SAMPLE {
        return Err(unexpected(format!(
            "{}-bit {:?} samples",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let frames = u64::from(reader.duration());
    let duration = Duration::from_secs_f64(frames as f64 / f64::from(spec.sample_rate));

    Ok(AudioArtifact {
        size_bytes: metadata.len(),
        duration,
    })
}
