//! Heuristic resume parsing over extracted plain text.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::resume::ResumeData;

const SKILL_VOCABULARY: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "React",
    "Node.js",
    "Express",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Python",
    "Java",
    "Go",
    "Rust",
    "C++",
    "C#",
    "SQL",
    "GraphQL",
    "Docker",
    "Kubernetes",
    "AWS",
    "Azure",
    "GCP",
    "Git",
    "Linux",
    "HTML",
    "CSS",
    "Figma",
    "TensorFlow",
    "PyTorch",
    "Pandas",
    "Machine Learning",
    "Data Analysis",
    "Agile",
    "Scrum",
];

const EDUCATION_MARKERS: &[&str] = &[
    "bachelor",
    "master",
    "b.tech",
    "m.tech",
    "b.sc",
    "m.sc",
    "b.s.",
    "m.s.",
    "phd",
    "ph.d",
    "mba",
    "university",
    "college",
    "institute",
];

const SUMMARY_MAX_CHARS: usize = 300;
const SUMMARY_MIN_WORDS: usize = 6;

fn experience_regex() -> &'static Regex {
    static EXPERIENCE: OnceLock<Regex> = OnceLock::new();
    EXPERIENCE.get_or_init(|| {
        Regex::new(r"(?i)\b(\d{1,2})\+?\s*(?:years?|yrs?)\b").expect("experience pattern is valid")
    })
}

/// Matches a skill as a whole token so "Go" does not fire on "good".
fn mentions_skill(text_lower: &str, skill: &str) -> bool {
    let skill_lower = skill.to_lowercase();
    text_lower.match_indices(&skill_lower).any(|(start, _)| {
        let before = text_lower[..start].chars().next_back();
        let after = text_lower[start + skill_lower.len()..].chars().next();
        let boundary = |c: Option<char>| !c.is_some_and(|c| c.is_alphanumeric() || c == '+' || c == '#');
        boundary(before) && boundary(after)
    })
}

pub fn parse_resume_text(text: &str) -> ResumeData {
    let text_lower = text.to_lowercase();

    let skills = SKILL_VOCABULARY
        .iter()
        .filter(|s| mentions_skill(&text_lower, s))
        .map(|s| s.to_string())
        .collect();

    let experience = experience_regex()
        .captures_iter(text)
        .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .map(|years| format!("{years} years"));

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let education = lines
        .iter()
        .find(|l| {
            let lower = l.to_lowercase();
            EDUCATION_MARKERS.iter().any(|m| lower.contains(m))
        })
        .map(|l| l.to_string());

    let summary = lines
        .iter()
        .find(|l| l.split_whitespace().count() >= SUMMARY_MIN_WORDS)
        .map(|l| l.chars().take(SUMMARY_MAX_CHARS).collect::<String>());

    ResumeData {
        skills,
        experience,
        education,
        summary,
    }
}
