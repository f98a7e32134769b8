use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::accounts;
use crate::auth::AuthUser;
use crate::coach::aggregation::{
    category_scores, dashboard_stats, overall_score, readiness_score, DashboardStats,
};
use crate::coach::feedback::generate_feedback;
use crate::coach::question_bank::list_questions;
use crate::coach::speech::analyze_speech;
use crate::coach::{AnswerAnalysis, QuestionRequest};
use crate::errors::AppError;
use crate::interview::store::{self, Completion};
use crate::models::interview::{InterviewQuestion, InterviewRow, SpeechAnalysis};
use crate::models::question::{Difficulty, Question, QuestionCategory};
use crate::state::AppState;

const DEFAULT_QUESTION_COUNT: usize = 5;
const MAX_QUESTION_COUNT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct StartInterviewRequest {
    pub job_role: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub question_index: usize,
    pub answer: String,
    #[serde(default)]
    pub time_spent: u32,
}

#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    pub question_index: usize,
    #[serde(flatten)]
    pub analysis: AnswerAnalysis,
    pub speech_analysis: Option<SpeechAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub name: String,
    pub email: String,
    pub target_role: String,
    pub readiness_score: i32,
    #[serde(flatten)]
    pub stats: DashboardStats,
}

#[derive(Debug, Deserialize)]
pub struct QuestionQuery {
    pub job_role: Option<String>,
    pub category: Option<QuestionCategory>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn question_count(requested: Option<usize>) -> Result<usize, AppError> {
    let count = requested.unwrap_or(DEFAULT_QUESTION_COUNT);
    if !(1..=MAX_QUESTION_COUNT).contains(&count) {
        return Err(AppError::Validation(format!(
            "count must be between 1 and {MAX_QUESTION_COUNT}"
        )));
    }
    Ok(count)
}

/// Records an analysed answer on its question slot.
fn record_answer(
    slot: &mut InterviewQuestion,
    answer: &str,
    time_spent: u32,
    analysis: &AnswerAnalysis,
) {
    slot.answer = answer.to_string();
    slot.time_spent = time_spent;
    slot.score = analysis.score;
    slot.feedback = Some(analysis.feedback.clone());
}

/// Blank answers carry no speech signal and must not replace an earlier
/// analysis.
fn speech_for_answer(answer: &str, time_spent: u32) -> Option<SpeechAnalysis> {
    if answer.trim().is_empty() {
        return None;
    }
    Some(analyze_speech(answer, Some(time_spent)))
}

/// Total seconds across questions, saturating at `i32::MAX`.
fn total_duration(questions: &[InterviewQuestion]) -> i32 {
    let total = questions
        .iter()
        .fold(0u64, |acc, q| acc.saturating_add(q.time_spent as u64));
    i32::try_from(total).unwrap_or(i32::MAX)
}

fn reject_if_completed(row: &InterviewRow) -> Result<(), AppError> {
    if row.is_completed() {
        return Err(AppError::Validation(
            "Interview is already completed".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/interviews
pub async fn handle_start(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<StartInterviewRequest>,
) -> Result<(StatusCode, Json<InterviewRow>), AppError> {
    let count = question_count(req.count)?;
    let user = accounts::get_user(&state.db, auth.user_id).await?;
    let job_role = req
        .job_role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(&user.target_role);

    let questions = state
        .coach
        .generate_questions(&QuestionRequest {
            job_role,
            difficulty: req.difficulty,
            count,
            resume: user.resume_data.as_ref().map(|d| &d.0),
        })
        .await?;

    let row =
        store::create_interview(&state.db, auth.user_id, job_role, req.difficulty, &questions)
            .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/interviews
pub async fn handle_list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    Ok(Json(store::list_interviews(&state.db, auth.user_id).await?))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewRow>, AppError> {
    Ok(Json(
        store::get_owned_interview(&state.db, id, auth.user_id).await?,
    ))
}

/// POST /api/v1/interviews/:id/answers
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>, AppError> {
    let row = store::get_owned_interview(&state.db, id, auth.user_id).await?;
    reject_if_completed(&row)?;

    let mut question = row
        .questions
        .0
        .get(req.question_index)
        .cloned()
        .ok_or_else(|| {
            AppError::Validation(format!("Invalid question index {}", req.question_index))
        })?;

    let analysis = state.coach.analyze_answer(&question, &req.answer).await?;
    let speech = speech_for_answer(&req.answer, req.time_spent);
    record_answer(&mut question, &req.answer, req.time_spent, &analysis);
    store::save_answer(
        &state.db,
        id,
        req.question_index,
        &question,
        speech.as_ref(),
    )
    .await?;

    Ok(Json(SubmitAnswerResponse {
        question_index: req.question_index,
        analysis,
        speech_analysis: speech,
    }))
}

/// POST /api/v1/interviews/:id/complete
///
/// Aggregates question scores, writes feedback, and refreshes the user's
/// readiness score.
pub async fn handle_complete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewRow>, AppError> {
    let mut tx = state.db.begin().await?;
    let row = store::lock_owned_interview(&mut tx, id, auth.user_id).await?;
    reject_if_completed(&row)?;

    let questions = &row.questions.0;
    if !questions.iter().any(|q| q.is_answered()) {
        warn!("Completing interview {id} with no answered questions");
    }
    let speech = row.speech_analysis.as_ref().map(|s| &s.0);
    let scores = category_scores(questions, speech);
    let feedback = generate_feedback(&scores, speech);
    let completed = store::complete_interview(
        &mut tx,
        id,
        Completion {
            scores: &scores,
            overall_score: overall_score(&scores),
            feedback: &feedback,
            duration_secs: total_duration(questions),
            completed_at: Utc::now(),
        },
    )
    .await?;
    tx.commit().await?;

    let history: Vec<u32> = store::list_completed(&state.db, auth.user_id)
        .await?
        .iter()
        .map(|i| i.overall_score.max(0) as u32)
        .collect();
    let readiness = readiness_score(&history);
    accounts::set_readiness_score(&state.db, auth.user_id, readiness).await?;
    info!("User {} readiness score is now {readiness}", auth.user_id);

    Ok(Json(completed))
}

/// GET /api/v1/analytics/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let user = accounts::get_user(&state.db, auth.user_id).await?;
    let completed = store::list_completed(&state.db, auth.user_id).await?;
    Ok(Json(DashboardResponse {
        name: user.name,
        email: user.email,
        target_role: user.target_role,
        readiness_score: user.readiness_score,
        stats: dashboard_stats(&completed),
    }))
}

/// GET /api/v1/questions
pub async fn handle_list_questions(
    _auth: AuthUser,
    Query(params): Query<QuestionQuery>,
) -> Json<Vec<Question>> {
    Json(list_questions(
        params.job_role.as_deref(),
        params.category,
        params.difficulty,
    ))
}
