//! Axum route handlers for registration, login, and profile.

use std::sync::OnceLock;

use axum::{extract::State, http::StatusCode, Json};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::accounts::{self, NewUser, ProfileUpdate};
use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::token::issue_token;
use crate::auth::AuthUser;
use crate::coach::question_bank::DEFAULT_ROLE;
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

const MIN_PASSWORD_CHARS: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("email pattern is valid")
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub target_role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub target_role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserRow,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Please provide a name".to_string()));
    }
    if !email_regex().is_match(&normalize_email(&req.email)) {
        return Err(AppError::Validation(
            "Please provide a valid email".to_string(),
        ));
    }
    if req.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters"
        )));
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    validate_registration(&req)?;

    let email = normalize_email(&req.email);
    let password_hash = hash_password_blocking(req.password.clone()).await?;
    let user = accounts::create_user(
        &state.db,
        NewUser {
            name: req.name.trim(),
            email: &email,
            password_hash: &password_hash,
            phone: non_blank(&req.phone),
            target_role: non_blank(&req.target_role).unwrap_or(DEFAULT_ROLE),
        },
    )
    .await?;

    let token = issue_token(user.id, &state.config.jwt_secret, state.config.jwt_expiry_days)?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// POST /api/v1/auth/login
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = accounts::find_by_email(&state.db, &normalize_email(&req.email))
        .await?
        .ok_or(AppError::Unauthorized)?;
    if !verify_password_blocking(req.password, user.password_hash.clone()).await? {
        return Err(AppError::Unauthorized);
    }

    info!("User {} logged in", user.id);
    let token = issue_token(user.id, &state.config.jwt_secret, state.config.jwt_expiry_days)?;
    Ok(Json(AuthResponse { token, user }))
}

/// GET /api/v1/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserRow>, AppError> {
    Ok(Json(accounts::get_user(&state.db, auth.user_id).await?))
}

/// PUT /api/v1/auth/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserRow>, AppError> {
    if req.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }

    let user = accounts::update_profile(
        &state.db,
        auth.user_id,
        ProfileUpdate {
            name: non_blank(&req.name),
            phone: non_blank(&req.phone),
            target_role: non_blank(&req.target_role),
        },
    )
    .await?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: None,
            target_role: None,
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&request("Ada", " Ada.L@Example.com ", "secret1")).is_ok());
    }

    #[test]
    fn test_rejects_blank_name() {
        assert!(matches!(
            validate_registration(&request("  ", "ada@example.com", "secret1")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_bad_email() {
        for email in ["ada", "ada@", "@example.com", "ada@example"] {
            assert!(
                validate_registration(&request("Ada", email, "secret1")).is_err(),
                "{email} accepted"
            );
        }
    }

    #[test]
    fn test_rejects_short_password() {
        assert!(validate_registration(&request("Ada", "ada@example.com", "12345")).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("  ".to_string())), None);
        assert_eq!(non_blank(&Some(" x ".to_string())), Some("x"));
        assert_eq!(non_blank(&None), None);
    }
}
