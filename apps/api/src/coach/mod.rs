//! Interview coach: question generation, answer scoring, and resume parsing.
//!
//! Two backends sit behind [`InterviewCoach`]:
//! - [`HeuristicCoach`]: static question bank + keyword matching. Deterministic, no I/O.
//! - [`llm::LlmCoach`]: prompt templates sent through the shared `LlmClient`.
//!
//! `AppState` carries an `Arc<dyn InterviewCoach>` chosen at startup from `COACH_BACKEND`.
//! Aggregation, speech analysis, and end-of-interview feedback are backend-independent
//! and live in their own modules.

pub mod aggregation;
pub mod answer;
pub mod feedback;
pub mod llm;
pub mod prompts;
pub mod question_bank;
pub mod resume_parser;
pub mod speech;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::interview::InterviewQuestion;
use crate::models::question::Difficulty;
use crate::models::resume::ResumeData;

pub use answer::AnswerAnalysis;

/// Inputs for generating an interview's question set.
#[derive(Debug, Clone)]
pub struct QuestionRequest<'a> {
    pub job_role: &'a str,
    pub difficulty: Difficulty,
    pub count: usize,
    pub resume: Option<&'a ResumeData>,
}

#[async_trait]
pub trait InterviewCoach: Send + Sync {
    /// "heuristic" | "llm"
    fn backend(&self) -> &'static str;

    async fn generate_questions(
        &self,
        request: &QuestionRequest<'_>,
    ) -> Result<Vec<InterviewQuestion>, AppError>;

    async fn analyze_answer(
        &self,
        question: &InterviewQuestion,
        answer: &str,
    ) -> Result<AnswerAnalysis, AppError>;

    async fn parse_resume(&self, text: &str) -> Result<ResumeData, AppError>;
}

pub struct HeuristicCoach;

#[async_trait]
impl InterviewCoach for HeuristicCoach {
    fn backend(&self) -> &'static str {
        "heuristic"
    }

    async fn generate_questions(
        &self,
        request: &QuestionRequest<'_>,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        Ok(question_bank::generate_questions(
            request.job_role,
            request.difficulty,
            request.count,
        ))
    }

    async fn analyze_answer(
        &self,
        question: &InterviewQuestion,
        answer: &str,
    ) -> Result<AnswerAnalysis, AppError> {
        Ok(answer::analyze_answer(answer, &question.expected_keywords))
    }

    async fn parse_resume(&self, text: &str) -> Result<ResumeData, AppError> {
        Ok(resume_parser::parse_resume_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_heuristic_coach_scores_against_question_keywords() {
        let coach = HeuristicCoach;
        let questions = coach
            .generate_questions(&QuestionRequest {
                job_role: "Software Developer",
                difficulty: Difficulty::Medium,
                count: 1,
                resume: None,
            })
            .await
            .unwrap();
        let analysis = coach
            .analyze_answer(
                &questions[0],
                "REST is a stateless HTTP API style where each endpoint is a resource.",
            )
            .await
            .unwrap();
        // all five REST keywords present
        assert_eq!(analysis.score, 80);
        assert_eq!(coach.backend(), "heuristic");
    }

    #[tokio::test]
    async fn test_heuristic_coach_parses_resume() {
        let data = HeuristicCoach
            .parse_resume("Senior engineer with 5 years of Rust and Docker")
            .await
            .unwrap();
        assert_eq!(data.experience.as_deref(), Some("5 years"));
        assert!(data.skills.contains(&"Rust".to_string()));
    }
}
