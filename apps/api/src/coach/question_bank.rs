//! Built-in question bank and keyword table used by the heuristic coach.

use crate::models::interview::InterviewQuestion;
use crate::models::question::{Difficulty, Question, QuestionCategory};

/// Role used when a requested job role has no bank of its own.
pub const DEFAULT_ROLE: &str = "Software Developer";

/// Keywords used for scoring when a question matches no topic.
pub const GENERIC_KEYWORDS: &[&str] = &["relevant", "experience", "example", "approach"];

struct RoleBank {
    role: &'static str,
    categories: &'static [(QuestionCategory, &'static [&'static str])],
}

const BANK: &[RoleBank] = &[
    RoleBank {
        role: "Software Developer",
        categories: &[
            (
                QuestionCategory::Technical,
                &[
                    "Explain the difference between REST and GraphQL APIs.",
                    "What is the time complexity of binary search?",
                    "Describe the SOLID principles in object-oriented programming.",
                    "How would you optimize a slow database query?",
                    "Explain the concept of closures in JavaScript.",
                    "What are the differences between SQL and NoSQL databases?",
                    "Describe your experience with version control systems like Git.",
                    "How do you handle error handling in your applications?",
                ],
            ),
            (
                QuestionCategory::Behavioral,
                &[
                    "Tell me about a challenging project you worked on.",
                    "How do you handle tight deadlines and pressure?",
                    "Describe a time when you had to learn a new technology quickly.",
                    "How do you approach debugging complex issues?",
                    "Tell me about a time you disagreed with a team member.",
                ],
            ),
            (
                QuestionCategory::Situational,
                &[
                    "How would you design a URL shortening service like bit.ly?",
                    "If you inherited legacy code, how would you approach refactoring it?",
                    "How would you handle a production bug affecting users?",
                    "Describe how you would implement a caching strategy.",
                ],
            ),
        ],
    },
    RoleBank {
        role: "Data Scientist",
        categories: &[
            (
                QuestionCategory::Technical,
                &[
                    "Explain the difference between supervised and unsupervised learning.",
                    "What is overfitting and how do you prevent it?",
                    "Describe the working of a Random Forest algorithm.",
                    "How do you handle missing data in a dataset?",
                    "Explain the bias-variance tradeoff.",
                ],
            ),
            (
                QuestionCategory::Behavioral,
                &[
                    "Describe a data analysis project you are proud of.",
                    "How do you communicate technical findings to non-technical stakeholders?",
                    "Tell me about a time when your analysis led to a business decision.",
                ],
            ),
        ],
    },
    RoleBank {
        role: "Product Manager",
        categories: &[
            (
                QuestionCategory::Technical,
                &[
                    "How do you prioritize features in a product roadmap?",
                    "Explain how you would conduct user research.",
                    "What metrics would you track for a mobile app?",
                ],
            ),
            (
                QuestionCategory::Behavioral,
                &[
                    "Describe a product you launched from concept to delivery.",
                    "How do you handle conflicting stakeholder requirements?",
                    "Tell me about a time when a product failed and what you learned.",
                ],
            ),
        ],
    },
    RoleBank {
        role: "UI/UX Designer",
        categories: &[
            (
                QuestionCategory::Technical,
                &[
                    "Explain your design process from research to final mockups.",
                    "How do you ensure accessibility in your designs?",
                    "What tools do you use for prototyping and why?",
                ],
            ),
            (
                QuestionCategory::Behavioral,
                &[
                    "Describe a time when you had to defend your design decisions.",
                    "How do you incorporate user feedback into your designs?",
                    "Tell me about a challenging design problem you solved.",
                ],
            ),
        ],
    },
];

/// Topic → expected keywords. The first topic found in the question wins.
const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    ("REST", &["REST", "HTTP", "API", "endpoint", "stateless"]),
    ("GraphQL", &["GraphQL", "query", "mutation", "schema"]),
    ("binary search", &["O(log n)", "sorted", "divide", "conquer"]),
    (
        "SOLID",
        &[
            "Single Responsibility",
            "Open-Closed",
            "Liskov",
            "Interface",
            "Dependency",
        ],
    ),
    ("closures", &["scope", "function", "lexical", "encapsulation"]),
    ("SQL", &["relational", "ACID", "joins", "normalized"]),
    (
        "NoSQL",
        &["document", "key-value", "scalability", "flexible schema"],
    ),
];

fn role_bank(job_role: &str) -> &'static RoleBank {
    BANK.iter()
        .find(|b| b.role.eq_ignore_ascii_case(job_role.trim()))
        .unwrap_or(&BANK[0])
}

/// Returns the expected keywords for a question by topic lookup.
///
/// Topics match as case-insensitive substrings, so "Random Forest" counts as
/// a mention of REST.
pub fn extract_keywords(question: &str) -> Vec<String> {
    let question_lower = question.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .find(|(topic, _)| question_lower.contains(&topic.to_lowercase()))
        .map(|(_, keywords)| *keywords)
        .unwrap_or(GENERIC_KEYWORDS)
        .iter()
        .map(|k| k.to_string())
        .collect()
}

/// Picks `count` questions for a role, rotating through its categories.
///
/// The i-th question comes from category `i % categories` and takes entry
/// `i % len` of that category, so the sequence is deterministic per role.
pub fn generate_questions(
    job_role: &str,
    difficulty: Difficulty,
    count: usize,
) -> Vec<InterviewQuestion> {
    let bank = role_bank(job_role);
    (0..count)
        .map(|i| {
            let (category, texts) = bank.categories[i % bank.categories.len()];
            let text = texts[i % texts.len()];
            InterviewQuestion {
                question_text: text.to_string(),
                category,
                difficulty,
                expected_keywords: extract_keywords(text),
                answer: String::new(),
                time_spent: 0,
                score: 0,
                feedback: None,
            }
        })
        .collect()
}

/// Lists bank entries, optionally filtered by role and category.
/// Bank questions are difficulty-agnostic; they are tagged with the requested one.
pub fn list_questions(
    job_role: Option<&str>,
    category: Option<QuestionCategory>,
    difficulty: Difficulty,
) -> Vec<Question> {
    BANK.iter()
        .filter(|b| job_role.map_or(true, |r| b.role.eq_ignore_ascii_case(r.trim())))
        .flat_map(|b| {
            b.categories
                .iter()
                .filter(move |(c, _)| category.map_or(true, |wanted| *c == wanted))
                .flat_map(move |(c, texts)| {
                    texts.iter().map(move |text| Question {
                        job_role: b.role.to_string(),
                        category: *c,
                        difficulty,
                        question_text: text.to_string(),
                        expected_keywords: extract_keywords(text),
                        sample_answer: None,
                    })
                })
        })
        .collect()
}
