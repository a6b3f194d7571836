use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use vidsub_core::shared::constants::{DEFAULT_LANGUAGE_CODE, FFMPEG_PROGRAM, GOOGLE_SPEECH_ENDPOINT};
use vidsub_core::speech::infrastructure::google_speech_recognizer::{
    Credentials, GoogleSpeechConfig,
};

use crate::error::CliError;

/// Name of the directory under the home directory used when no work or
/// output directory is configured.
const DEFAULT_DIR_NAME: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub work_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub language_code: String,
    pub endpoint: String,
    pub ffmpeg_path: PathBuf,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_dir: None,
            output_dir: None,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            endpoint: GOOGLE_SPEECH_ENDPOINT.to_string(),
            ffmpeg_path: PathBuf::from(FFMPEG_PROGRAM),
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("vidsub").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Missing files give the defaults; unreadable or invalid ones are
    /// reported and also fall back to the defaults.
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Ignoring settings at {}: {e}", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Work and output directories, defaulting to `<home>/tmp` for whichever
    /// one is not configured.
    pub fn resolve_dirs(&self, home: Option<PathBuf>) -> Result<(PathBuf, PathBuf), CliError> {
        let fallback = || {
            home.as_ref()
                .map(|h| h.join(DEFAULT_DIR_NAME))
                .ok_or_else(|| CliError::Usage("could not determine home directory".to_string()))
        };
        let work_dir = match &self.work_dir {
            Some(dir) => dir.clone(),
            None => fallback()?,
        };
        let output_dir = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => fallback()?,
        };
        Ok((work_dir, output_dir))
    }

    pub fn speech_config(&self, credentials: Option<Credentials>) -> GoogleSpeechConfig {
        GoogleSpeechConfig {
            endpoint: self.endpoint.clone(),
            language_code: self.language_code.clone(),
            credentials,
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}
