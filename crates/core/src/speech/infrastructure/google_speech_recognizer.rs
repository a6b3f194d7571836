use std::time::Duration;

use crate::shared::constants::{DEFAULT_LANGUAGE_CODE, GOOGLE_RECOGNIZE_PATH, GOOGLE_SPEECH_ENDPOINT};
use crate::speech::domain::speech_recognizer::{SpeechRecognizer, TranscriptionError};
use crate::speech::domain::transcript::RecognitionResult;
use crate::speech::infrastructure::google_wire::{
    api_error_message, RecognizeRequest, RecognizeResponse,
};

/// How requests to the speech service are authenticated.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Sent as the `key` query parameter.
    ApiKey(String),
    /// Sent as an `Authorization: Bearer` header.
    BearerToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => write!(f, "ApiKey(<redacted>)"),
            Credentials::BearerToken(_) => write!(f, "BearerToken(<redacted>)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GoogleSpeechConfig {
    /// Base URL of the service, without the method path.
    pub endpoint: String,
    pub language_code: String,
    pub credentials: Option<Credentials>,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GoogleSpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: GOOGLE_SPEECH_ENDPOINT.to_string(),
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            credentials: None,
            timeout: None,
        }
    }
}

/// Speech recognizer backed by the Google Cloud Speech-to-Text v1 REST API.
///
/// Sends the whole audio artifact in one synchronous `speech:recognize`
/// call, declared as 16 kHz LINEAR16 with word time offsets enabled. A fresh
/// HTTP client is built for every call.
#[derive(Debug)]
pub struct GoogleSpeechRecognizer {
    config: GoogleSpeechConfig,
}

impl GoogleSpeechRecognizer {
    pub fn new(config: GoogleSpeechConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GoogleSpeechConfig {
        &self.config
    }

    fn recognize_url(&self) -> String {
        format!(
            "{}{}",
            self.config.endpoint.trim_end_matches('/'),
            GOOGLE_RECOGNIZE_PATH
        )
    }
}

impl SpeechRecognizer for GoogleSpeechRecognizer {
    fn recognize(&self, audio: &[u8]) -> Result<Vec<RecognitionResult>, TranscriptionError> {
        let credentials = self
            .config
            .credentials
            .as_ref()
            .ok_or(TranscriptionError::MissingCredentials)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(TranscriptionError::Client)?;

        let url = self.recognize_url();
        let body = RecognizeRequest::linear16(audio, &self.config.language_code);

        let request = client.post(&url).json(&body);
        let request = match credentials {
            Credentials::ApiKey(key) => request.query(&[("key", key.as_str())]),
            Credentials::BearerToken(token) => request.bearer_auth(token),
        };

        log::debug!(
            "Sending {} bytes of audio to {url} (language {})",
            audio.len(),
            self.config.language_code
        );

        let response = request.send().map_err(|e| TranscriptionError::Request {
            url: url.clone(),
            source: e,
        })?;

        let status = response.status();
        let text = response.text().map_err(|e| TranscriptionError::Request {
            url: url.clone(),
            source: e,
        })?;

        if !status.is_success() {
            return Err(TranscriptionError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: RecognizeResponse = serde_json::from_str(&text)
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;
        let results = parsed.into_results()?;

        log::info!("Speech service returned {} results", results.len());
        Ok(results)
    }
}
