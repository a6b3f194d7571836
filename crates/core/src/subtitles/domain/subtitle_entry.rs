use std::time::Duration;

use crate::speech::domain::transcript::{Alternative, RecognitionResult};

/// One numbered, timed block of a SubRip file.
#[derive(Clone, Debug, PartialEq)]
pub struct SubtitleEntry {
    pub index: usize,
    pub start: Duration,
    pub end: Duration,
    pub text: String,
}

impl SubtitleEntry {
    /// Build one entry per alternative that carries at least one timed word.
    ///
    /// Indices start at 1 and advance only for emitted entries, so skipped
    /// alternatives never leave gaps in the numbering. An alternative with
    /// nothing to show is skipped too: a blank text line would end the cue.
    pub fn from_results(results: &[RecognitionResult]) -> Vec<SubtitleEntry> {
        results
            .iter()
            .flat_map(|result| result.alternatives.iter())
            .filter_map(|alt| {
                let (start, end) = alt.span()?;
                let text = entry_text(alt)?;
                Some((start, end, text))
            })
            .enumerate()
            .map(|(i, (start, end, text))| SubtitleEntry {
                index: i + 1,
                start,
                end,
                text,
            })
            .collect()
    }

    pub fn to_srt_block(&self) -> String {
        format!(
            "{}\n{} --> {}\n{}\n\n",
            self.index,
            format_srt_timestamp(self.start),
            format_srt_timestamp(self.end),
            self.text
        )
    }
}

/// Trimmed transcript, or the recognized words when the transcript is blank.
fn entry_text(alt: &Alternative) -> Option<String> {
    let transcript = alt.transcript.trim();
    let text = if transcript.is_empty() {
        alt.words
            .iter()
            .map(|w| w.word.trim())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        transcript.to_string()
    };
    (!text.is_empty()).then_some(text)
}

/// Render entries as SubRip text. No entries renders as an empty string.
pub fn render_srt(entries: &[SubtitleEntry]) -> String {
    entries.iter().map(SubtitleEntry::to_srt_block).collect()
}

/// Format an offset as `HH:MM:SS,mmm`. Sub-millisecond precision is truncated.
/// Hours are not wrapped, so offsets past 99 hours widen the field.
pub fn format_srt_timestamp(offset: Duration) -> String {
    let total_ms = offset.as_millis();
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{hours:02}:{mins:02}:{secs:02},{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::domain::transcript::TranscriptWord;
    use rstest::rstest;

    fn word(start_ms: u64, end_ms: u64) -> TranscriptWord {
        TranscriptWord {
            word: "w".to_string(),
            start_time: Duration::from_millis(start_ms),
            end_time: Duration::from_millis(end_ms),
        }
    }

    fn alt(text: &str, words: Vec<TranscriptWord>) -> Alternative {
        Alternative {
            transcript: text.to_string(),
            confidence: None,
            words,
        }
    }

    #[rstest]
    #[case::zero(Duration::ZERO, "00:00:00,000")]
    #[case::half_second(Duration::from_millis(1500), "00:00:01,500")]
    #[case::minutes(Duration::from_millis(65_123), "00:01:05,123")]
    #[case::hours(Duration::from_millis(3_661_500), "01:01:01,500")]
    #[case::truncates_nanos(Duration::new(2, 999_999_999), "00:00:02,999")]
    #[case::many_hours(Duration::from_secs(100 * 3600), "100:00:00,000")]
    fn test_format_srt_timestamp(#[case] offset: Duration, #[case] expected: &str) {
        assert_eq!(format_srt_timestamp(offset), expected);
    }

    #[test]
    fn test_hello_world_scenario() {
        let results = vec![RecognitionResult {
            alternatives: vec![alt("hello world", vec![word(0, 500), word(500, 1000)])],
        }];

        let entries = SubtitleEntry::from_results(&results);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            render_srt(&entries),
            "1\n00:00:00,000 --> 00:00:01,000\nhello world\n\n"
        );
    }

    #[test]
    fn test_skipped_alternatives_leave_no_index_gaps() {
        let results = vec![
            RecognitionResult {
                alternatives: vec![alt("untimed", vec![]), alt("first", vec![word(0, 400)])],
            },
            RecognitionResult {
                alternatives: vec![],
            },
            RecognitionResult {
                alternatives: vec![
                    alt("second", vec![word(1000, 1200), word(1200, 1900)]),
                    alt("also untimed", vec![]),
                    alt("third", vec![word(2500, 3000)]),
                ],
            },
        ];

        let entries = SubtitleEntry::from_results(&results);
        let indices: Vec<usize> = entries.iter().map(|e| e.index).collect();
        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();

        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_entry_span_is_first_start_to_last_end() {
        let results = vec![RecognitionResult {
            alternatives: vec![alt(
                "a b c",
                vec![word(1234, 1500), word(1500, 1800), word(1800, 2345)],
            )],
        }];

        let entry = &SubtitleEntry::from_results(&results)[0];
        assert_eq!(entry.start, Duration::from_millis(1234));
        assert_eq!(entry.end, Duration::from_millis(2345));
    }

    #[test]
    fn test_text_is_trimmed() {
        let results = vec![RecognitionResult {
            alternatives: vec![alt(" and then\n", vec![word(0, 100)])],
        }];
        assert_eq!(SubtitleEntry::from_results(&results)[0].text, "and then");
    }

    fn named(text: &str, start_ms: u64, end_ms: u64) -> TranscriptWord {
        TranscriptWord {
            word: text.to_string(),
            ..word(start_ms, end_ms)
        }
    }

    #[test]
    fn test_blank_transcript_falls_back_to_words() {
        let results = vec![RecognitionResult {
            alternatives: vec![alt("   ", vec![named("good", 0, 300), named("morning", 300, 900)])],
        }];

        let entries = SubtitleEntry::from_results(&results);
        assert_eq!(
            render_srt(&entries),
            "1\n00:00:00,000 --> 00:00:00,900\ngood morning\n\n"
        );
    }

    #[test]
    fn test_alternative_with_nothing_to_show_is_skipped() {
        let results = vec![RecognitionResult {
            alternatives: vec![
                alt("  ", vec![named(" ", 0, 10)]),
                alt("after", vec![named("after", 20, 80)]),
            ],
        }];

        let entries = SubtitleEntry::from_results(&results);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[0].text, "after");
        assert!(!render_srt(&entries).contains("\n\n\n"));
    }

    #[test]
    fn test_empty_results_render_empty() {
        let entries = SubtitleEntry::from_results(&[]);
        assert!(entries.is_empty());
        assert_eq!(render_srt(&entries), "");
    }
}
