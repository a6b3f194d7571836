pub const FFMPEG_PROGRAM: &str = "ffmpeg";

/// Sample rate the audio artifact is resampled to and declared to the recognizer.
pub const SPEECH_SAMPLE_RATE: u32 = 16000;
pub const SPEECH_CHANNELS: u16 = 1;
pub const SPEECH_BITS_PER_SAMPLE: u16 = 16;

pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

pub const GOOGLE_SPEECH_ENDPOINT: &str = "https://speech.googleapis.com";
pub const GOOGLE_RECOGNIZE_PATH: &str = "/v1/speech:recognize";

pub const AUDIO_ARTIFACT_NAME: &str = "audio.wav";
pub const SUBTITLE_EXTENSION: &str = "srt";
