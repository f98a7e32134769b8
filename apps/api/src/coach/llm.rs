//! LLM-backed coach. The model does the reasoning; this module only fills
//! prompt templates and checks the reply against a typed shape.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::coach::prompts::{ANSWER_PROMPT, QUESTIONS_PROMPT, RESUME_PROMPT};
use crate::coach::{AnswerAnalysis, InterviewCoach, QuestionRequest};
use crate::errors::AppError;
use crate::llm_client::prompts::{INTERVIEWER_PERSONA, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::interview::InterviewQuestion;
use crate::models::question::QuestionCategory;
use crate::models::resume::ResumeData;

#[derive(Debug, Deserialize)]
struct GeneratedQuestions {
    questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Deserialize)]
struct GeneratedQuestion {
    question_text: String,
    category: QuestionCategory,
    #[serde(default)]
    expected_keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AnswerVerdict {
    score: f64,
    feedback: String,
    #[serde(default)]
    keywords_used: Vec<String>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
}

impl AnswerVerdict {
    fn into_analysis(self) -> AnswerAnalysis {
        AnswerAnalysis {
            score: clamp_score(self.score),
            feedback: self.feedback,
            keywords_used: self.keywords_used,
            strengths: self.strengths,
            improvements: self.improvements,
        }
    }
}

fn clamp_score(raw: f64) -> u32 {
    if raw.is_finite() {
        raw.round().clamp(0.0, 100.0) as u32
    } else {
        0
    }
}

fn system_prompt() -> String {
    format!("{INTERVIEWER_PERSONA}\n\n{JSON_ONLY_SYSTEM}")
}

fn render_resume(resume: Option<&ResumeData>) -> String {
    resume
        .and_then(|r| serde_json::to_string_pretty(r).ok())
        .unwrap_or_default()
}

fn into_interview_questions(
    generated: GeneratedQuestions,
    request: &QuestionRequest<'_>,
) -> Vec<InterviewQuestion> {
    generated
        .questions
        .into_iter()
        .filter(|q| !q.question_text.trim().is_empty())
        .take(request.count)
        .map(|q| InterviewQuestion {
            question_text: q.question_text.trim().to_string(),
            category: q.category,
            difficulty: request.difficulty,
            expected_keywords: q.expected_keywords,
            answer: String::new(),
            time_spent: 0,
            score: 0,
            feedback: None,
        })
        .collect()
}

pub struct LlmCoach(pub LlmClient);

#[async_trait]
impl InterviewCoach for LlmCoach {
    fn backend(&self) -> &'static str {
        "llm"
    }

    async fn generate_questions(
        &self,
        request: &QuestionRequest<'_>,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        let prompt = QUESTIONS_PROMPT
            .replace("{count}", &request.count.to_string())
            .replace("{job_role}", request.job_role)
            .replace("{difficulty}", request.difficulty.as_str())
            .replace("{resume}", &render_resume(request.resume));

        let generated: GeneratedQuestions = self
            .0
            .call_json(&prompt, &system_prompt())
            .await
            .map_err(|e| AppError::Llm(format!("Question generation failed: {e}")))?;

        let questions = into_interview_questions(generated, request);
        if questions.is_empty() {
            return Err(AppError::Llm("Model returned no questions".to_string()));
        }
        if questions.len() < request.count {
            warn!(
                "Model returned {} of {} requested questions",
                questions.len(),
                request.count
            );
        }
        Ok(questions)
    }

    async fn analyze_answer(
        &self,
        question: &InterviewQuestion,
        answer: &str,
    ) -> Result<AnswerAnalysis, AppError> {
        let prompt = ANSWER_PROMPT
            .replace("{category}", &format!("{:?}", question.category))
            .replace("{question}", &question.question_text)
            .replace("{keywords}", &question.expected_keywords.join(", "))
            .replace("{answer}", answer);

        let verdict: AnswerVerdict = self
            .0
            .call_json(&prompt, &system_prompt())
            .await
            .map_err(|e| AppError::Llm(format!("Answer analysis failed: {e}")))?;

        Ok(verdict.into_analysis())
    }

    async fn parse_resume(&self, text: &str) -> Result<ResumeData, AppError> {
        let prompt = RESUME_PROMPT.replace("{resume}", text);
        self.0
            .call_json(&prompt, &system_prompt())
            .await
            .map_err(|e| AppError::Llm(format!("Resume parsing failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::parse_json_reply;
    use crate::models::question::Difficulty;

    #[test]
    fn test_verdict_score_is_clamped() {
        let verdict: AnswerVerdict =
            parse_json_reply(r#"{"score": 140, "feedback": "Great"}"#).unwrap();
        assert_eq!(verdict.into_analysis().score, 100);
        assert_eq!(clamp_score(-3.0), 0);
        assert_eq!(clamp_score(f64::NAN), 0);
        assert_eq!(clamp_score(72.6), 73);
    }

    #[test]
    fn test_verdict_requires_feedback() {
        let result: Result<AnswerVerdict, _> = parse_json_reply(r#"{"score": 50}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_generated_questions_are_trimmed_to_count() {
        let reply = r#"```json
        {"questions": [
            {"question_text": "Explain ownership.", "category": "technical", "expected_keywords": ["borrow"]},
            {"question_text": "  ", "category": "Behavioral"},
            {"question_text": "Describe a conflict.", "category": "Behavioral"},
            {"question_text": "Design a cache.", "category": "Situational"}
        ]}
        ```"#;
        let generated: GeneratedQuestions = parse_json_reply(reply).unwrap();
        let request = QuestionRequest {
            job_role: "Software Developer",
            difficulty: Difficulty::Hard,
            count: 2,
            resume: None,
        };
        let questions = into_interview_questions(generated, &request);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].category, QuestionCategory::Technical);
        assert_eq!(questions[1].question_text, "Describe a conflict.");
        assert!(questions.iter().all(|q| q.difficulty == Difficulty::Hard));
    }

    #[test]
    fn test_render_resume_empty_when_missing() {
        assert_eq!(render_resume(None), "");
        let data = ResumeData {
            skills: vec!["Rust".into()],
            ..ResumeData::default()
        };
        assert!(render_resume(Some(&data)).contains("Rust"));
    }
}
