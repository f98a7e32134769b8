use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::question::{Difficulty, QuestionCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewStatus {
    Pending,
    InProgress,
    Completed,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Pending => "pending",
            InterviewStatus::InProgress => "in-progress",
            InterviewStatus::Completed => "completed",
        }
    }
}

/// One question slot of an interview, in the order it was asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question_text: String,
    pub category: QuestionCategory,
    pub difficulty: Difficulty,
    pub expected_keywords: Vec<String>,
    #[serde(default)]
    pub answer: String,
    /// Seconds the candidate spent answering.
    #[serde(default)]
    pub time_spent: u32,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl InterviewQuestion {
    pub fn is_answered(&self) -> bool {
        !self.answer.trim().is_empty()
    }
}

/// Per-category scores for a completed interview, each 0–100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub technical: u32,
    pub communication: u32,
    pub confidence: u32,
    pub clarity: u32,
    pub professionalism: u32,
    pub creativity: u32,
    pub leadership: u32,
    pub teamwork: u32,
    pub attitude: u32,
}

impl CategoryScores {
    pub fn values(&self) -> [u32; 9] {
        [
            self.technical,
            self.communication,
            self.confidence,
            self.clarity,
            self.professionalism,
            self.creativity,
            self.leadership,
            self.teamwork,
            self.attitude,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Slow,
    Moderate,
    Fast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechAnalysis {
    pub tone: String,
    pub clarity: u32,
    pub pace: Pace,
    pub filler_words: u32,
    pub words_per_minute: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewFeedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_role: String,
    pub difficulty: String,
    pub status: String,
    pub questions: Json<Vec<InterviewQuestion>>,
    pub scores: Option<Json<CategoryScores>>,
    pub overall_score: i32,
    pub feedback: Option<Json<InterviewFeedback>>,
    pub speech_analysis: Option<Json<SpeechAnalysis>>,
    pub duration_secs: i32,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl InterviewRow {
    pub fn is_completed(&self) -> bool {
        self.status == InterviewStatus::Completed.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&InterviewStatus::InProgress).unwrap();
        assert_eq!(json, r#""in-progress""#);
        assert_eq!(InterviewStatus::InProgress.as_str(), "in-progress");
    }

    #[test]
    fn test_question_defaults_when_unanswered() {
        let json = r#"{
            "question_text": "What is overfitting?",
            "category": "Technical",
            "difficulty": "Medium",
            "expected_keywords": ["relevant"]
        }"#;
        let q: InterviewQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.score, 0);
        assert!(!q.is_answered());
        assert!(q.feedback.is_none());
    }
}
