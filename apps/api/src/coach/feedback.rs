use crate::models::interview::{CategoryScores, InterviewFeedback, SpeechAnalysis};

const STRONG_CATEGORY: u32 = 75;
const FEW_FILLERS: u32 = 5;
const MANY_FILLERS: u32 = 10;

/// Builds end-of-interview strengths, improvements, and a summary.
pub fn generate_feedback(
    scores: &CategoryScores,
    speech: Option<&SpeechAnalysis>,
) -> InterviewFeedback {
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    let checks = [
        (
            scores.technical,
            "Strong technical knowledge",
            "Review core technical concepts",
        ),
        (
            scores.communication,
            "Excellent communication skills",
            "Practice articulating thoughts more clearly",
        ),
        (
            scores.confidence,
            "Confident presentation",
            "Work on building confidence through practice",
        ),
    ];
    for (score, strength, improvement) in checks {
        if score >= STRONG_CATEGORY {
            strengths.push(strength.to_string());
        } else {
            improvements.push(improvement.to_string());
        }
    }

    if let Some(speech) = speech {
        if speech.filler_words < FEW_FILLERS {
            strengths.push("Minimal use of filler words".to_string());
        } else if speech.filler_words > MANY_FILLERS {
            improvements.push("Reduce filler words (um, uh, like)".to_string());
        }
    }

    let values = scores.values();
    let average = values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64;
    let summary = if average >= 80.0 {
        "Outstanding performance! You demonstrated strong skills across all areas. Keep up the excellent work."
    } else if average >= 65.0 {
        "Good performance overall. Focus on the improvement areas to reach the next level."
    } else {
        "You have potential. Practice more interviews and focus on the key improvement areas."
    };

    InterviewFeedback {
        strengths,
        improvements,
        summary: summary.to_string(),
    }
}
