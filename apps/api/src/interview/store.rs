use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::{
    CategoryScores, InterviewFeedback, InterviewQuestion, InterviewRow, InterviewStatus,
    SpeechAnalysis,
};
use crate::models::question::Difficulty;

pub async fn create_interview(
    pool: &PgPool,
    user_id: Uuid,
    job_role: &str,
    difficulty: Difficulty,
    questions: &[InterviewQuestion],
) -> Result<InterviewRow, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>(
        r#"
        INSERT INTO interviews (id, user_id, job_role, difficulty, status, questions)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(job_role)
    .bind(difficulty.as_str())
    .bind(InterviewStatus::Pending.as_str())
    .bind(Json(questions))
    .fetch_one(pool)
    .await?;

    info!(
        "Started interview {} for user {user_id} ({} questions)",
        row.id,
        questions.len()
    );
    Ok(row)
}

/// Loads an interview and enforces ownership: 404 if missing, 403 if it
/// belongs to someone else.
pub async fn get_owned_interview(
    pool: &PgPool,
    interview_id: Uuid,
    user_id: Uuid,
) -> Result<InterviewRow, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
        .bind(interview_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))?;

    ensure_owner(row, user_id)
}

/// Same as [`get_owned_interview`] but takes a row lock for the rest of the
/// caller's transaction.
pub async fn lock_owned_interview(
    conn: &mut PgConnection,
    interview_id: Uuid,
    user_id: Uuid,
) -> Result<InterviewRow, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews WHERE id = $1 FOR UPDATE",
    )
    .bind(interview_id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| AppError::NotFound("Interview not found".to_string()))?;

    ensure_owner(row, user_id)
}

fn ensure_owner(row: InterviewRow, user_id: Uuid) -> Result<InterviewRow, AppError> {
    if row.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    Ok(row)
}

pub async fn list_interviews(pool: &PgPool, user_id: Uuid) -> Result<Vec<InterviewRow>, AppError> {
    Ok(sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Completed interviews, newest first.
pub async fn list_completed(pool: &PgPool, user_id: Uuid) -> Result<Vec<InterviewRow>, AppError> {
    Ok(sqlx::query_as::<_, InterviewRow>(
        "SELECT * FROM interviews WHERE user_id = $1 AND status = $2 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .bind(InterviewStatus::Completed.as_str())
    .fetch_all(pool)
    .await?)
}

fn already_completed() -> AppError {
    AppError::Validation("Interview is already completed".to_string())
}

fn ensure_updated(rows_affected: u64) -> Result<(), AppError> {
    if rows_affected == 0 {
        return Err(already_completed());
    }
    Ok(())
}

/// Writes one answered question slot in place. Other slots are untouched, so
/// answers to different questions do not overwrite each other.
pub async fn save_answer(
    pool: &PgPool,
    interview_id: Uuid,
    question_index: usize,
    question: &InterviewQuestion,
    speech: Option<&SpeechAnalysis>,
) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        UPDATE interviews
        SET questions = jsonb_set(questions, ARRAY[$2::text], $3),
            speech_analysis = COALESCE($4, speech_analysis),
            status = $5
        WHERE id = $1 AND status <> $6
        "#,
    )
    .bind(interview_id)
    .bind(question_index.to_string())
    .bind(Json(question))
    .bind(speech.map(Json))
    .bind(InterviewStatus::InProgress.as_str())
    .bind(InterviewStatus::Completed.as_str())
    .execute(pool)
    .await?;

    ensure_updated(result.rows_affected())
}

pub struct Completion<'a> {
    pub scores: &'a CategoryScores,
    pub overall_score: u32,
    pub feedback: &'a InterviewFeedback,
    pub duration_secs: i32,
    pub completed_at: DateTime<Utc>,
}

pub async fn complete_interview(
    conn: &mut PgConnection,
    interview_id: Uuid,
    completion: Completion<'_>,
) -> Result<InterviewRow, AppError> {
    let row = sqlx::query_as::<_, InterviewRow>(
        r#"
        UPDATE interviews
        SET status = $2, scores = $3, overall_score = $4, feedback = $5,
            duration_secs = $6, completed_at = $7
        WHERE id = $1 AND status <> $2
        RETURNING *
        "#,
    )
    .bind(interview_id)
    .bind(InterviewStatus::Completed.as_str())
    .bind(Json(completion.scores))
    .bind(completion.overall_score as i32)
    .bind(Json(completion.feedback))
    .bind(completion.duration_secs)
    .bind(completion.completed_at)
    .fetch_optional(conn)
    .await?
    .ok_or_else(already_completed)?;

    info!(
        "Completed interview {interview_id} with overall score {}",
        completion.overall_score
    );
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_owned_by(user_id: Uuid) -> InterviewRow {
        InterviewRow {
            id: Uuid::new_v4(),
            user_id,
            job_role: "Software Developer".to_string(),
            difficulty: "Medium".to_string(),
            status: InterviewStatus::InProgress.as_str().to_string(),
            questions: Json(Vec::new()),
            scores: None,
            overall_score: 0,
            feedback: None,
            speech_analysis: None,
            duration_secs: 0,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn test_owner_passes() {
        let owner = Uuid::new_v4();
        let row = ensure_owner(row_owned_by(owner), owner).unwrap();
        assert_eq!(row.user_id, owner);
    }

    #[test]
    fn test_no_rows_updated_means_completed() {
        assert!(ensure_updated(1).is_ok());
        assert!(matches!(ensure_updated(0), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_other_user_is_forbidden() {
        let result = ensure_owner(row_owned_by(Uuid::new_v4()), Uuid::new_v4());
        assert!(matches!(result, Err(AppError::Forbidden)));
    }
}
