use std::path::PathBuf;
use std::time::Instant;

use thiserror::Error;

use crate::audio::domain::audio_artifact::{self, AudioArtifact};
use crate::audio::domain::audio_extractor::{AudioExtractor, ExtractionError};
use crate::pipeline::pipeline_logger::{PipelineLogger, Stage};
use crate::shared::run_paths::RunPaths;
use crate::speech::domain::speech_recognizer::{SpeechRecognizer, TranscriptionError};
use crate::subtitles::domain::subtitle_writer::{SubtitleWriter, WriteError};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to extract audio: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("failed to transcribe audio: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("failed to write subtitles: {0}")]
    Write(#[from] WriteError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Extraction(_) => Stage::Extract,
            PipelineError::Transcription(_) => Stage::Transcribe,
            PipelineError::Write(_) => Stage::Write,
        }
    }
}

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub subtitle_path: PathBuf,
    pub audio: AudioArtifact,
    pub results: usize,
    pub entries: usize,
}

/// Turns a video into a SubRip file: extract audio, recognize speech, write
/// subtitles. Stages run strictly in order and the first failure ends the run.
pub struct GenerateSubtitlesUseCase {
    extractor: Box<dyn AudioExtractor>,
    recognizer: Box<dyn SpeechRecognizer>,
    writer: Box<dyn SubtitleWriter>,
    logger: Box<dyn PipelineLogger>,
}

impl GenerateSubtitlesUseCase {
    pub fn new(
        extractor: Box<dyn AudioExtractor>,
        recognizer: Box<dyn SpeechRecognizer>,
        writer: Box<dyn SubtitleWriter>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            extractor,
            recognizer,
            writer,
            logger,
        }
    }

    pub fn run(&mut self, paths: &RunPaths) -> Result<RunSummary, PipelineError> {
        // 1. Extract the audio track and make sure it is usable
        self.logger.stage_started(Stage::Extract);
        let started = Instant::now();
        self.extractor.extract(&paths.video, &paths.audio_artifact)?;
        let audio = audio_artifact::verify(&paths.audio_artifact)?;
        self.logger.timing(Stage::Extract, elapsed_ms(started));
        self.logger.info(&format!(
            "Extracted {:.1}s of audio to {}",
            audio.duration.as_secs_f64(),
            paths.audio_artifact.display()
        ));

        // 2. Recognize speech in the whole artifact at once
        self.logger.stage_started(Stage::Transcribe);
        let started = Instant::now();
        let bytes = std::fs::read(&paths.audio_artifact).map_err(|e| {
            TranscriptionError::ReadAudio {
                path: paths.audio_artifact.clone(),
                source: e,
            }
        })?;
        let results = self.recognizer.recognize(&bytes)?;
        self.logger.timing(Stage::Transcribe, elapsed_ms(started));
        self.logger.info(&format!("Received {} recognition results", results.len()));

        // 3. Write subtitles
        self.logger.stage_started(Stage::Write);
        let started = Instant::now();
        let entries = self.writer.write(&results, &paths.subtitle)?;
        self.logger.timing(Stage::Write, elapsed_ms(started));
        self.logger.info(&format!(
            "Wrote {entries} subtitle entries to {}",
            paths.subtitle.display()
        ));

        self.logger.summary();

        Ok(RunSummary {
            subtitle_path: paths.subtitle.clone(),
            audio,
            results: results.len(),
            entries,
        })
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::domain::audio_artifact::test_support::write_wav;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::speech::domain::transcript::{Alternative, RecognitionResult, TranscriptWord};
    use crate::subtitles::infrastructure::srt_file_writer::SrtFileWriter;
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tempfile::TempDir;

    // ─── Stubs ───

    enum ExtractBehavior {
        WriteWav,
        Fail,
        WriteNothing,
    }

    struct StubExtractor {
        behavior: ExtractBehavior,
    }

    impl AudioExtractor for StubExtractor {
        fn extract(&self, _video: &Path, audio: &Path) -> Result<(), ExtractionError> {
            match self.behavior {
                ExtractBehavior::WriteWav => {
                    write_wav(audio, 16000, 1, 1.0);
                    Ok(())
                }
                ExtractBehavior::Fail => Err(ExtractionError::Failed {
                    program: "ffmpeg".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "No such file or directory".to_string(),
                }),
                ExtractBehavior::WriteNothing => Ok(()),
            }
        }
    }

    struct StubRecognizer {
        response: Result<Vec<RecognitionResult>, u16>,
        received: Arc<Mutex<Option<Vec<u8>>>>,
    }

    impl StubRecognizer {
        fn returning(results: Vec<RecognitionResult>) -> Self {
            Self {
                response: Ok(results),
                received: Arc::new(Mutex::new(None)),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                response: Err(status),
                received: Arc::new(Mutex::new(None)),
            }
        }
    }

    impl SpeechRecognizer for StubRecognizer {
        fn recognize(&self, audio: &[u8]) -> Result<Vec<RecognitionResult>, TranscriptionError> {
            *self.received.lock().unwrap() = Some(audio.to_vec());
            match &self.response {
                Ok(results) => Ok(results.clone()),
                Err(status) => Err(TranscriptionError::Api {
                    status: *status,
                    message: "quota exceeded".to_string(),
                }),
            }
        }
    }

    #[derive(Clone, Default)]
    struct RecordingLogger {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl PipelineLogger for RecordingLogger {
        fn stage_started(&mut self, stage: Stage) {
            self.events.lock().unwrap().push(format!("start:{stage}"));
        }
        fn timing(&mut self, stage: Stage, _duration_ms: f64) {
            self.events.lock().unwrap().push(format!("done:{stage}"));
        }
        fn info(&mut self, _message: &str) {}
    }

    // ─── Helpers ───

    fn hello_world() -> Vec<RecognitionResult> {
        let word = |w: &str, start: u64, end: u64| TranscriptWord {
            word: w.to_string(),
            start_time: Duration::from_millis(start),
            end_time: Duration::from_millis(end),
        };
        vec![RecognitionResult {
            alternatives: vec![Alternative {
                transcript: "hello world".to_string(),
                confidence: Some(0.9),
                words: vec![word("hello", 0, 500), word("world", 500, 1000)],
            }],
        }]
    }

    fn paths(tmp: &TempDir) -> RunPaths {
        RunPaths::new(Path::new("/videos/talk.mp4"), tmp.path(), tmp.path())
    }

    fn use_case(extractor: StubExtractor, recognizer: StubRecognizer) -> GenerateSubtitlesUseCase {
        GenerateSubtitlesUseCase::new(
            Box::new(extractor),
            Box::new(recognizer),
            Box::new(SrtFileWriter::new()),
            Box::new(NullPipelineLogger),
        )
    }

    // ─── Tests ───

    #[test]
    fn test_hello_world_scenario() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let mut uc = use_case(
            StubExtractor {
                behavior: ExtractBehavior::WriteWav,
            },
            StubRecognizer::returning(hello_world()),
        );

        let summary = uc.run(&paths).unwrap();

        assert_eq!(summary.subtitle_path, tmp.path().join("talk.mp4.srt"));
        assert_eq!(summary.entries, 1);
        assert_eq!(summary.results, 1);
        assert_eq!(
            fs::read_to_string(&summary.subtitle_path).unwrap(),
            "1\n00:00:00,000 --> 00:00:01,000\nhello world\n\n"
        );
    }

    #[test]
    fn test_recognizer_receives_artifact_bytes() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let recognizer = StubRecognizer::returning(Vec::new());
        let received = recognizer.received.clone();
        let mut uc = use_case(
            StubExtractor {
                behavior: ExtractBehavior::WriteWav,
            },
            recognizer,
        );

        uc.run(&paths).unwrap();

        let sent = received.lock().unwrap().clone().unwrap();
        assert_eq!(sent, fs::read(&paths.audio_artifact).unwrap());
    }

    #[test]
    fn test_extraction_failure_never_touches_subtitle() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let recognizer = StubRecognizer::returning(hello_world());
        let received = recognizer.received.clone();
        let mut uc = use_case(
            StubExtractor {
                behavior: ExtractBehavior::Fail,
            },
            recognizer,
        );

        let err = uc.run(&paths).unwrap_err();

        assert!(matches!(err, PipelineError::Extraction(_)));
        assert_eq!(err.stage(), Stage::Extract);
        assert!(!paths.subtitle.exists());
        assert!(received.lock().unwrap().is_none());
    }

    #[test]
    fn test_extraction_failure_keeps_previous_subtitle() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        fs::write(&paths.subtitle, "previous run\n").unwrap();
        let mut uc = use_case(
            StubExtractor {
                behavior: ExtractBehavior::Fail,
            },
            StubRecognizer::returning(hello_world()),
        );

        assert!(uc.run(&paths).is_err());
        assert_eq!(fs::read_to_string(&paths.subtitle).unwrap(), "previous run\n");
    }

    #[test]
    fn test_missing_artifact_stops_before_transcription() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let recognizer = StubRecognizer::returning(hello_world());
        let received = recognizer.received.clone();
        let mut uc = use_case(
            StubExtractor {
                behavior: ExtractBehavior::WriteNothing,
            },
            recognizer,
        );

        let err = uc.run(&paths).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Extraction(ExtractionError::MissingArtifact(_))
        ));
        assert!(received.lock().unwrap().is_none());
        assert!(!paths.subtitle.exists());
    }

    #[test]
    fn test_recognition_failure_keeps_artifact_and_skips_subtitle() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let mut uc = use_case(
            StubExtractor {
                behavior: ExtractBehavior::WriteWav,
            },
            StubRecognizer::failing(429),
        );

        let err = uc.run(&paths).unwrap_err();

        assert_eq!(err.stage(), Stage::Transcribe);
        assert_eq!(
            err.to_string(),
            "failed to transcribe audio: speech service returned 429: quota exceeded"
        );
        assert!(paths.audio_artifact.exists());
        assert!(!paths.subtitle.exists());
    }

    #[test]
    fn test_empty_transcript_creates_empty_file() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let mut uc = use_case(
            StubExtractor {
                behavior: ExtractBehavior::WriteWav,
            },
            StubRecognizer::returning(Vec::new()),
        );

        let summary = uc.run(&paths).unwrap();

        assert_eq!(summary.entries, 0);
        assert_eq!(fs::read_to_string(&paths.subtitle).unwrap(), "");
    }

    #[test]
    fn test_write_failure_is_write_error() {
        let tmp = TempDir::new().unwrap();
        let paths = RunPaths::new(
            Path::new("talk.mp4"),
            tmp.path(),
            &tmp.path().join("missing_output_dir"),
        );
        let mut uc = use_case(
            StubExtractor {
                behavior: ExtractBehavior::WriteWav,
            },
            StubRecognizer::returning(hello_world()),
        );

        let err = uc.run(&paths).unwrap_err();
        assert_eq!(err.stage(), Stage::Write);
        assert!(err.to_string().starts_with("failed to write subtitles:"));
    }

    #[test]
    fn test_logger_sees_stages_in_order() {
        let tmp = TempDir::new().unwrap();
        let paths = paths(&tmp);
        let logger = RecordingLogger::default();
        let events = logger.events.clone();
        let mut uc = GenerateSubtitlesUseCase::new(
            Box::new(StubExtractor {
                behavior: ExtractBehavior::WriteWav,
            }),
            Box::new(StubRecognizer::returning(hello_world())),
            Box::new(SrtFileWriter::new()),
            Box::new(logger),
        );

        uc.run(&paths).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "start:extract",
                "done:extract",
                "start:transcribe",
                "done:transcribe",
                "start:write",
                "done:write",
            ]
        );
    }
}
