//! Heuristic answer scoring.
//!
//! score = 40 base (or a flat 20 for answers under 20 characters)
//!       + 40 × matched_keywords / expected_keywords
//!       + 10 if longer than 100 characters, + 10 more if longer than 200
//! clamped to 100 and rounded.

use serde::{Deserialize, Serialize};

const MIN_ANSWER_CHARS: usize = 20;
const SHORT_ANSWER_SCORE: u32 = 20;
const BASE_SCORE: f64 = 40.0;
const KEYWORD_POINTS: f64 = 40.0;
const LENGTH_BONUS: f64 = 10.0;
const LONG_ANSWER_CHARS: usize = 100;
const VERY_LONG_ANSWER_CHARS: usize = 200;

pub const SHORT_ANSWER_FEEDBACK: &str =
    "Answer is too short. Please provide more detailed responses.";

/// Result of scoring one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerAnalysis {
    /// 0 – 100
    pub score: u32,
    pub feedback: String,
    #[serde(default)]
    pub keywords_used: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// Scores an answer transcript against the expected keywords.
pub fn analyze_answer(answer: &str, expected_keywords: &[String]) -> AnswerAnalysis {
    if answer.trim().chars().count() < MIN_ANSWER_CHARS {
        return AnswerAnalysis {
            score: SHORT_ANSWER_SCORE,
            feedback: SHORT_ANSWER_FEEDBACK.to_string(),
            keywords_used: vec![],
            strengths: vec![],
            improvements: vec!["Give a complete, structured answer".to_string()],
        };
    }

    let answer_lower = answer.to_lowercase();
    let keywords_used: Vec<String> = expected_keywords
        .iter()
        .filter(|k| answer_lower.contains(&k.to_lowercase()))
        .cloned()
        .collect();

    let mut score = BASE_SCORE;
    if !expected_keywords.is_empty() {
        score += keywords_used.len() as f64 / expected_keywords.len() as f64 * KEYWORD_POINTS;
    }

    let length = answer.chars().count();
    if length > LONG_ANSWER_CHARS {
        score += LENGTH_BONUS;
    }
    if length > VERY_LONG_ANSWER_CHARS {
        score += LENGTH_BONUS;
    }
    let score = score.min(100.0);

    let missing: Vec<String> = expected_keywords
        .iter()
        .filter(|k| !keywords_used.contains(k))
        .cloned()
        .collect();

    AnswerAnalysis {
        score: score.round().clamp(0.0, 100.0) as u32,
        feedback: feedback_for(score, expected_keywords),
        strengths: keywords_used
            .iter()
            .map(|k| format!("Mentioned {k}"))
            .collect(),
        improvements: missing.iter().map(|k| format!("Cover {k}")).collect(),
        keywords_used,
    }
}

/// Thresholds are applied to the unrounded score.
fn feedback_for(score: f64, expected_keywords: &[String]) -> String {
    if score >= 80.0 {
        "Excellent answer! You covered the key concepts well.".to_string()
    } else if score >= 60.0 {
        let top: Vec<&str> = expected_keywords
            .iter()
            .take(2)
            .map(String::as_str)
            .collect();
        format!(
            "Good answer, but could include more details about: {}",
            top.join(", ")
        )
    } else if expected_keywords.is_empty() {
        "Consider elaborating with concrete examples.".to_string()
    } else {
        format!("Consider elaborating on: {}", expected_keywords.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_answer_gets_flat_score() {
        let result = analyze_answer("   too short   ", &kws(&["REST"]));
        assert_eq!(result.score, 20);
        assert_eq!(result.feedback, SHORT_ANSWER_FEEDBACK);
    }

    #[test]
    fn test_base_score_without_keywords() {
        let result = analyze_answer("I would think about this carefully.", &kws(&["REST"]));
        assert_eq!(result.score, 40);
        assert_eq!(result.feedback, "Consider elaborating on: REST");
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        let keywords = kws(&["REST", "HTTP", "API", "endpoint"]);
        let result = analyze_answer("a rest api exposes each endpoint over http", &keywords);
        // 40 + 40 * 4/4
        assert_eq!(result.score, 80);
        assert_eq!(result.keywords_used.len(), 4);
        assert!(result.feedback.starts_with("Excellent"));
    }

    #[test]
    fn test_partial_keywords_rounds() {
        let keywords = kws(&["scope", "function", "lexical"]);
        let result = analyze_answer("A closure captures its lexical environment.", &keywords);
        // 40 + 40/3 = 53.33
        assert_eq!(result.score, 53);
        assert_eq!(result.improvements.len(), 2);
    }

    #[test]
    fn test_length_bonuses_and_clamp() {
        let keywords = kws(&["relevant"]);
        let long = format!("relevant {}", "x".repeat(250));
        let result = analyze_answer(&long, &keywords);
        // 40 + 40 + 10 + 10 = 100
        assert_eq!(result.score, 100);

        let medium = format!("relevant {}", "x".repeat(120));
        assert_eq!(analyze_answer(&medium, &keywords).score, 90);
    }

    #[test]
    fn test_good_feedback_lists_first_two_keywords() {
        let keywords = kws(&["relational", "ACID", "joins", "normalized"]);
        let answer = format!("SQL is relational and ACID compliant. {}", "y".repeat(80));
        let result = analyze_answer(&answer, &keywords);
        // 40 + 20 + 10 = 70
        assert_eq!(result.score, 70);
        assert_eq!(
            result.feedback,
            "Good answer, but could include more details about: relational, ACID"
        );
    }

    #[test]
    fn test_empty_keyword_list_adds_nothing() {
        let result = analyze_answer("This answer is long enough to count.", &[]);
        assert_eq!(result.score, 40);
    }

    #[test]
    fn test_score_monotonic_in_matched_keywords() {
        let keywords = kws(&["alpha", "beta", "gamma", "delta"]);
        let answers = [
            "nothing useful is said in here at all",
            "alpha is said in here at all, nothing more",
            "alpha and beta are said in here, nothing more",
            "alpha beta gamma are said in here, nothing more",
            "alpha beta gamma delta all said in here, done",
        ];
        let scores: Vec<u32> = answers
            .iter()
            .map(|a| analyze_answer(a, &keywords).score)
            .collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]), "{scores:?}");
    }

    #[test]
    fn test_score_monotonic_in_length_and_bounded() {
        let keywords = kws(&["alpha", "beta"]);
        let mut previous = 0;
        for len in (0..400).step_by(7) {
            let answer = format!("alpha {}", "z".repeat(len));
            let score = analyze_answer(&answer, &keywords).score;
            assert!(score >= previous, "len {len}: {score} < {previous}");
            assert!(score <= 100);
            previous = score;
        }
    }
}
