use std::path::{Path, PathBuf};

use crate::shared::constants::{AUDIO_ARTIFACT_NAME, SUBTITLE_EXTENSION};

/// Filesystem locations touched by a single run.
///
/// The audio artifact lives in the work directory under a fixed name and is
/// overwritten on every run. The subtitle file is named after the input
/// video's full base name with `.srt` appended, so `talk.mp4` becomes
/// `talk.mp4.srt`.
#[derive(Clone, Debug, PartialEq)]
pub struct RunPaths {
    pub video: PathBuf,
    pub audio_artifact: PathBuf,
    pub subtitle: PathBuf,
}

impl RunPaths {
    pub fn new(video: &Path, work_dir: &Path, output_dir: &Path) -> Self {
        Self {
            video: video.to_path_buf(),
            audio_artifact: work_dir.join(AUDIO_ARTIFACT_NAME),
            subtitle: output_dir.join(subtitle_file_name(video)),
        }
    }
}

fn subtitle_file_name(video: &Path) -> String {
    let base = video
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "subtitles".to_string());
    format!("{base}.{SUBTITLE_EXTENSION}")
}
