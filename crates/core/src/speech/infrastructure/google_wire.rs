//! JSON shapes of the Speech-to-Text v1 `speech:recognize` REST call.

use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::shared::constants::SPEECH_SAMPLE_RATE;
use crate::speech::domain::speech_recognizer::TranscriptionError;
use crate::speech::domain::transcript::{Alternative, RecognitionResult, TranscriptWord};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecognizeRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    encoding: &'static str,
    sample_rate_hertz: u32,
    language_code: &'a str,
    enable_word_time_offsets: bool,
}

#[derive(Serialize, Debug)]
struct RecognitionAudio {
    content: String,
}

impl<'a> RecognizeRequest<'a> {
    pub(crate) fn linear16(audio: &[u8], language_code: &'a str) -> Self {
        Self {
            config: RecognitionConfig {
                encoding: "LINEAR16",
                sample_rate_hertz: SPEECH_SAMPLE_RATE,
                language_code,
                enable_word_time_offsets: true,
            },
            audio: RecognitionAudio {
                content: general_purpose::STANDARD.encode(audio),
            },
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct RecognizeResponse {
    #[serde(default)]
    results: Vec<WireResult>,
}

#[derive(Deserialize, Debug, Default)]
struct WireResult {
    #[serde(default)]
    alternatives: Vec<WireAlternative>,
}

#[derive(Deserialize, Debug, Default)]
struct WireAlternative {
    #[serde(default)]
    transcript: String,
    confidence: Option<f32>,
    #[serde(default)]
    words: Vec<WireWord>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct WireWord {
    #[serde(default)]
    word: String,
    start_time: Option<String>,
    end_time: Option<String>,
}

impl RecognizeResponse {
    pub(crate) fn into_results(self) -> Result<Vec<RecognitionResult>, TranscriptionError> {
        self.results
            .into_iter()
            .map(|result| -> Result<RecognitionResult, TranscriptionError> {
                let alternatives = result
                    .alternatives
                    .into_iter()
                    .map(WireAlternative::into_domain)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(RecognitionResult { alternatives })
            })
            .collect()
    }
}

impl WireAlternative {
    fn into_domain(self) -> Result<Alternative, TranscriptionError> {
        let words = self
            .words
            .into_iter()
            .map(|w| -> Result<TranscriptWord, TranscriptionError> {
                Ok(TranscriptWord {
                    start_time: parse_offset_or_zero(w.start_time.as_deref())?,
                    end_time: parse_offset_or_zero(w.end_time.as_deref())?,
                    word: w.word,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Alternative {
            transcript: self.transcript,
            confidence: self.confidence,
            words,
        })
    }
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorStatus,
}

#[derive(Deserialize, Debug)]
struct ErrorStatus {
    #[serde(default)]
    message: String,
}

/// Pull the human-readable message out of a Google error body, falling back
/// to the raw body when it is not the usual `{"error": {...}}` envelope.
pub(crate) fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body.trim().to_string(),
    }
}

fn parse_offset_or_zero(value: Option<&str>) -> Result<Duration, TranscriptionError> {
    match value {
        Some(text) => parse_offset(text),
        None => Ok(Duration::ZERO),
    }
}

/// Parse a protobuf JSON duration such as `"1.500s"` into whole seconds plus
/// a nanosecond remainder. Negative offsets are rejected.
pub(crate) fn parse_offset(text: &str) -> Result<Duration, TranscriptionError> {
    let invalid = || TranscriptionError::InvalidResponse(format!("malformed time offset '{text}'"));

    let body = text.strip_suffix('s').ok_or_else(invalid)?;
    let (secs, frac) = match body.split_once('.') {
        Some((secs, frac)) => (secs, frac),
        None => (body, ""),
    };

    if secs.is_empty() || !secs.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let secs: u64 = secs.parse().map_err(|_| invalid())?;
    let nanos = if frac.is_empty() {
        0
    } else {
        let padded = format!("{frac:0<9}");
        padded.parse::<u32>().map_err(|_| invalid())?
    };

    Ok(Duration::new(secs, nanos))
}
