use std::time::Duration;

/// One recognized word with its offsets from the start of the audio.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptWord {
    pub word: String,
    pub start_time: Duration,
    pub end_time: Duration,
}

impl TranscriptWord {
    pub fn duration(&self) -> Duration {
        self.end_time.saturating_sub(self.start_time)
    }
}

/// One candidate transcription of a segment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Alternative {
    pub transcript: String,
    pub confidence: Option<f32>,
    pub words: Vec<TranscriptWord>,
}

impl Alternative {
    /// Time span from the first word's start to the last word's end.
    /// Returns `None` when the alternative carries no timed words.
    pub fn span(&self) -> Option<(Duration, Duration)> {
        let first = self.words.first()?;
        let last = self.words.last()?;
        Some((first.start_time, last.end_time))
    }
}

/// One segment of a transcript as returned by the recognizer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognitionResult {
    pub alternatives: Vec<Alternative>,
}
