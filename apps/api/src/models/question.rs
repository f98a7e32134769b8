use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionCategory {
    #[serde(alias = "technical")]
    Technical,
    #[serde(alias = "behavioral")]
    Behavioral,
    #[serde(alias = "situational")]
    Situational,
    #[serde(alias = "communication")]
    Communication,
}

/// A question bank entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub job_role: String,
    pub category: QuestionCategory,
    pub difficulty: Difficulty,
    pub question_text: String,
    pub expected_keywords: Vec<String>,
    pub sample_answer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_default_is_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_category_serde_uses_variant_names() {
        let json = serde_json::to_string(&QuestionCategory::Situational).unwrap();
        assert_eq!(json, r#""Situational""#);
        let parsed: QuestionCategory = serde_json::from_str(r#""behavioral""#).unwrap();
        assert_eq!(parsed, QuestionCategory::Behavioral);
    }
}
