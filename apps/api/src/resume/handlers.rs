//! Axum route handlers for resume upload and analysis.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::accounts;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::resume::extract::{detect_kind, extract_text_blocking, ExtractError};
use crate::resume::storage::{get_resume, put_resume, resume_key};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub file_name: String,
    pub resume_key: String,
    pub parsed_data: ResumeData,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub file_name: String,
    pub resume_key: String,
    pub data: ResumeData,
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

fn multipart_error(e: MultipartError, context: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    AppError::Validation(format!("{context}: {}", e.body_text()))
}

/// Extraction failures on a fresh upload are the client's problem, except a
/// lost worker task.
fn upload_extract_error(e: ExtractError) -> AppError {
    match e {
        ExtractError::Worker(_) => AppError::Internal(e.into()),
        other => AppError::Validation(other.to_string()),
    }
}

async fn read_resume_field(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Malformed multipart body"))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Could not read upload"))?;
        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation("Please upload a file".to_string()))
}

/// POST /api/v1/resume
///
/// Multipart field `resume` (PDF or DOCX). Stores the file, parses the
/// text, and saves the structured profile on the user.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let upload = read_resume_field(&mut multipart).await?;
    if upload.bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let kind = detect_kind(upload.content_type.as_deref(), &upload.file_name, &upload.bytes)
        .map_err(upload_extract_error)?;
    let text = extract_text_blocking(kind, upload.bytes.clone())
        .await
        .map_err(upload_extract_error)?;

    let key = resume_key(auth.user_id, Uuid::new_v4(), &upload.file_name);
    put_resume(
        &state.s3,
        &state.config.s3_bucket,
        &key,
        kind.content_type(),
        upload.bytes,
    )
    .await?;

    let parsed_data = state.coach.parse_resume(&text).await?;
    accounts::set_resume(&state.db, auth.user_id, &key, &upload.file_name, &parsed_data).await?;

    info!(
        "User {} uploaded resume {} ({} skills found)",
        auth.user_id,
        upload.file_name,
        parsed_data.skills.len()
    );

    Ok(Json(ResumeUploadResponse {
        file_name: upload.file_name,
        resume_key: key,
        parsed_data,
    }))
}

/// GET /api/v1/resume
pub async fn handle_get_resume(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ResumeResponse>, AppError> {
    let user = accounts::get_user(&state.db, auth.user_id).await?;
    let (Some(resume_key), Some(file_name)) = (user.resume_key, user.resume_file_name) else {
        return Err(AppError::NotFound("No resume uploaded".to_string()));
    };
    Ok(Json(ResumeResponse {
        file_name,
        resume_key,
        data: user.resume_data.map(|d| d.0).unwrap_or_default(),
    }))
}

/// GET /api/v1/resume/analysis
///
/// Re-fetches the stored file and parses it again with the current coach.
pub async fn handle_resume_analysis(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ResumeResponse>, AppError> {
    let user = accounts::get_user(&state.db, auth.user_id).await?;
    let (Some(resume_key), Some(file_name)) = (user.resume_key, user.resume_file_name) else {
        return Err(AppError::NotFound(
            "No resume found. Please upload your resume first.".to_string(),
        ));
    };

    let bytes = get_resume(&state.s3, &state.config.s3_bucket, &resume_key).await?;
    let text = match detect_kind(None, &file_name, &bytes) {
        Ok(kind) => extract_text_blocking(kind, bytes).await,
        Err(e) => Err(e),
    }
    .map_err(|e| {
        warn!("Stored resume {resume_key} no longer parses: {e}");
        AppError::Internal(e.into())
    })?;
    let data = state.coach.parse_resume(&text).await?;

    Ok(Json(ResumeResponse {
        file_name,
        resume_key,
        data,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_extract_errors_are_client_errors() {
        assert!(matches!(
            upload_extract_error(ExtractError::LegacyDoc),
            AppError::Validation(_)
        ));
        assert!(matches!(
            upload_extract_error(ExtractError::Malformed),
            AppError::Validation(_)
        ));
        assert!(matches!(
            upload_extract_error(ExtractError::Worker("cancelled".into())),
            AppError::Internal(_)
        ));
    }
}
