//! Prompt templates for the LLM coach. Placeholders are `{name}` and are
//! filled with `str::replace`.

pub const QUESTIONS_PROMPT: &str = r#"Generate {count} interview questions for a {job_role} candidate at {difficulty} difficulty.

Candidate resume (may be empty):
{resume}

Mix categories across Technical, Behavioral and Situational. Tailor questions to the resume when it is present.

Return a JSON object with this exact shape:
{"questions": [{"question_text": string, "category": "Technical" | "Behavioral" | "Situational" | "Communication", "expected_keywords": [string]}]}

expected_keywords lists 3 to 6 terms a strong answer would mention."#;

pub const ANSWER_PROMPT: &str = r#"Evaluate the candidate's answer to an interview question.

Question ({category}): {question}
Expected keywords: {keywords}

Answer transcript:
{answer}

Return a JSON object with this exact shape:
{"score": integer 0-100, "feedback": string, "keywords_used": [string], "strengths": [string], "improvements": [string]}

feedback is one or two sentences addressed to the candidate."#;

pub const RESUME_PROMPT: &str = r#"Extract a structured profile from this resume text.

Resume:
{resume}

Return a JSON object with this exact shape:
{"skills": [string], "experience": string | null, "education": string | null, "summary": string | null}

experience is a short phrase such as "3 years". Use null when the resume does not say."#;
