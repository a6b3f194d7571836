//! Turn a video file into SubRip subtitles.
//!
//! The pipeline has three pluggable stages: an [`AudioExtractor`] that pulls
//! a mono 16 kHz WAV out of the video, a [`SpeechRecognizer`] that returns
//! word-timed recognition results, and a [`SubtitleWriter`] that lays them out
//! as numbered SubRip blocks. [`GenerateSubtitlesUseCase`] runs them in order.
//!
//! [`AudioExtractor`]: audio::domain::audio_extractor::AudioExtractor
//! [`SpeechRecognizer`]: speech::domain::speech_recognizer::SpeechRecognizer
//! [`SubtitleWriter`]: subtitles::domain::subtitle_writer::SubtitleWriter
//! [`GenerateSubtitlesUseCase`]: pipeline::generate_subtitles_use_case::GenerateSubtitlesUseCase

pub mod audio;
pub mod pipeline;
pub mod shared;
pub mod speech;
pub mod subtitles;
