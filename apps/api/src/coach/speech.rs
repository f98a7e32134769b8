//! Speech-pattern analysis over an answer transcript.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::interview::{Pace, SpeechAnalysis};

const FILLER_WORDS: &[&str] = &["um", "uh", "like", "you know", "basically", "actually"];
const SLOW_WPM: u32 = 100;
const FAST_WPM: u32 = 160;
const CLARITY_PENALTY_PER_FILLER: u32 = 5;

fn filler_regex() -> &'static Regex {
    static FILLERS: OnceLock<Regex> = OnceLock::new();
    FILLERS.get_or_init(|| {
        let alternation = FILLER_WORDS
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("filler pattern is valid")
    })
}

/// Counts whole-word filler occurrences, case-insensitively.
pub fn count_filler_words(transcript: &str) -> u32 {
    filler_regex().find_iter(transcript).count() as u32
}

/// Analyzes pace and clarity of a transcript.
///
/// When `duration_secs` is known the word count is scaled to words per minute;
/// otherwise the raw word count stands in for it.
pub fn analyze_speech(transcript: &str, duration_secs: Option<u32>) -> SpeechAnalysis {
    let words = transcript.split_whitespace().count() as u32;
    let words_per_minute = match duration_secs {
        Some(secs) if secs > 0 => ((words as f64) * 60.0 / secs as f64).round() as u32,
        _ => words,
    };

    let pace = if words_per_minute < SLOW_WPM {
        Pace::Slow
    } else if words_per_minute > FAST_WPM {
        Pace::Fast
    } else {
        Pace::Moderate
    };

    let filler_words = count_filler_words(transcript);
    let clarity = 100u32.saturating_sub(filler_words.saturating_mul(CLARITY_PENALTY_PER_FILLER));

    SpeechAnalysis {
        tone: "confident".to_string(),
        clarity,
        pace,
        filler_words,
        words_per_minute,
    }
}
