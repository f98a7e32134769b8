//! Rolls per-question scores into category, interview, and user-level scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::interview::{CategoryScores, InterviewQuestion, InterviewRow, SpeechAnalysis};

/// Score for categories that have no measured signal.
pub const NEUTRAL_CATEGORY_SCORE: u32 = 75;
const RECENT_INTERVIEWS: usize = 5;
const SCORE_HISTORY_LEN: usize = 10;

fn rounded_mean(values: impl IntoIterator<Item = u32>) -> u32 {
    let (sum, count) = values
        .into_iter()
        .fold((0u64, 0u64), |(s, c), v| (s + v as u64, c + 1));
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

/// Mean of all question scores; unanswered questions count as 0.
pub fn technical_score(questions: &[InterviewQuestion]) -> u32 {
    rounded_mean(questions.iter().map(|q| q.score))
}

/// Builds the category breakdown for an interview.
pub fn category_scores(
    questions: &[InterviewQuestion],
    speech: Option<&SpeechAnalysis>,
) -> CategoryScores {
    let clarity = speech.map_or(NEUTRAL_CATEGORY_SCORE, |s| s.clarity);
    CategoryScores {
        technical: technical_score(questions),
        communication: clarity,
        confidence: NEUTRAL_CATEGORY_SCORE,
        clarity,
        professionalism: NEUTRAL_CATEGORY_SCORE,
        creativity: NEUTRAL_CATEGORY_SCORE,
        leadership: NEUTRAL_CATEGORY_SCORE,
        teamwork: NEUTRAL_CATEGORY_SCORE,
        attitude: NEUTRAL_CATEGORY_SCORE,
    }
}

/// Unweighted mean of every category.
pub fn overall_score(scores: &CategoryScores) -> u32 {
    rounded_mean(scores.values())
}

/// Mean overall score across a user's completed interviews.
pub fn readiness_score(completed_overall_scores: &[u32]) -> u32 {
    rounded_mean(completed_overall_scores.iter().copied())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub id: Uuid,
    pub job_role: String,
    pub score: u32,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_interviews: usize,
    pub avg_score: u32,
    pub category_averages: CategoryScores,
    /// Newest first.
    pub recent_interviews: Vec<InterviewSummary>,
    /// Oldest first, for charting.
    pub score_history: Vec<InterviewSummary>,
}

fn summarize(row: &InterviewRow) -> InterviewSummary {
    InterviewSummary {
        id: row.id,
        job_role: row.job_role.clone(),
        score: row.overall_score.max(0) as u32,
        date: row.created_at,
    }
}

/// Computes dashboard stats from completed interviews sorted newest first.
pub fn dashboard_stats(completed: &[InterviewRow]) -> DashboardStats {
    let scores: Vec<CategoryScores> = completed
        .iter()
        .map(|i| i.scores.as_ref().map(|s| s.0).unwrap_or_default())
        .collect();

    let category_averages = CategoryScores {
        technical: rounded_mean(scores.iter().map(|s| s.technical)),
        communication: rounded_mean(scores.iter().map(|s| s.communication)),
        confidence: rounded_mean(scores.iter().map(|s| s.confidence)),
        clarity: rounded_mean(scores.iter().map(|s| s.clarity)),
        professionalism: rounded_mean(scores.iter().map(|s| s.professionalism)),
        creativity: rounded_mean(scores.iter().map(|s| s.creativity)),
        leadership: rounded_mean(scores.iter().map(|s| s.leadership)),
        teamwork: rounded_mean(scores.iter().map(|s| s.teamwork)),
        attitude: rounded_mean(scores.iter().map(|s| s.attitude)),
    };

    let mut score_history: Vec<InterviewSummary> = completed
        .iter()
        .take(SCORE_HISTORY_LEN)
        .map(summarize)
        .collect();
    score_history.reverse();

    DashboardStats {
        total_interviews: completed.len(),
        avg_score: rounded_mean(completed.iter().map(|i| i.overall_score.max(0) as u32)),
        category_averages,
        recent_interviews: completed
            .iter()
            .take(RECENT_INTERVIEWS)
            .map(summarize)
            .collect(),
        score_history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::Pace;
    use crate::models::question::{Difficulty, QuestionCategory};
    use chrono::Duration;
    use sqlx::types::Json;

    fn question(score: u32) -> InterviewQuestion {
        InterviewQuestion {
            question_text: "Q".to_string(),
            category: QuestionCategory::Technical,
            difficulty: Difficulty::Medium,
            expected_keywords: vec![],
            answer: if score > 0 { "answer".into() } else { String::new() },
            time_spent: 0,
            score,
            feedback: None,
        }
    }

    fn completed_row(overall: i32, technical: u32, age_days: i64) -> InterviewRow {
        InterviewRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            job_role: "Software Developer".to_string(),
            difficulty: "Medium".to_string(),
            status: "completed".to_string(),
            questions: Json(vec![]),
            scores: Some(Json(CategoryScores {
                technical,
                ..CategoryScores::default()
            })),
            overall_score: overall,
            feedback: None,
            speech_analysis: None,
            duration_secs: 0,
            created_at: Utc::now() - Duration::days(age_days),
            completed_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_technical_counts_unanswered_as_zero() {
        let questions = vec![question(80), question(60), question(0)];
        assert_eq!(technical_score(&questions), 47);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(technical_score(&[]), 0);
        assert_eq!(readiness_score(&[]), 0);
        assert_eq!(dashboard_stats(&[]).avg_score, 0);
    }

    #[test]
    fn test_category_scores_use_speech_clarity() {
        let speech = SpeechAnalysis {
            tone: "confident".into(),
            clarity: 90,
            pace: Pace::Moderate,
            filler_words: 2,
            words_per_minute: 120,
        };
        let scores = category_scores(&[question(70)], Some(&speech));
        assert_eq!(scores.technical, 70);
        assert_eq!(scores.communication, 90);
        assert_eq!(scores.clarity, 90);
        assert_eq!(scores.leadership, NEUTRAL_CATEGORY_SCORE);
    }

    #[test]
    fn test_category_scores_without_speech_are_neutral() {
        let scores = category_scores(&[question(100)], None);
        assert_eq!(scores.communication, NEUTRAL_CATEGORY_SCORE);
        // (100 + 8 * 75) / 9 = 77.8
        assert_eq!(overall_score(&scores), 78);
    }

    #[test]
    fn test_readiness_rounds_mean() {
        assert_eq!(readiness_score(&[70, 81]), 76);
    }

    #[test]
    fn test_dashboard_history_is_chronological() {
        let rows: Vec<_> = (0..12)
            .map(|i| completed_row(50 + i as i32, 60, i))
            .collect();
        let stats = dashboard_stats(&rows);
        assert_eq!(stats.total_interviews, 12);
        assert_eq!(stats.recent_interviews.len(), 5);
        assert_eq!(stats.recent_interviews[0].score, 50);
        assert_eq!(stats.score_history.len(), 10);
        // oldest of the ten newest comes first
        assert_eq!(stats.score_history[0].score, 59);
        assert_eq!(stats.score_history[9].score, 50);
        assert_eq!(stats.category_averages.technical, 60);
    }
}
