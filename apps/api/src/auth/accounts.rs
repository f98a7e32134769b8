use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::models::user::UserRow;

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub phone: Option<&'a str>,
    pub target_role: &'a str,
}

/// Inserts a user. A duplicate email maps to `Conflict`.
pub async fn create_user(pool: &PgPool, new_user: NewUser<'_>) -> Result<UserRow, AppError> {
    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, name, email, password_hash, phone, target_role)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new_user.name)
    .bind(new_user.email)
    .bind(new_user.password_hash)
    .bind(new_user.phone)
    .bind(new_user.target_role)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return AppError::Conflict("An account with this email already exists".to_string());
            }
        }
        AppError::Database(e)
    })?;

    info!("Created user {}", user.id);
    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, AppError> {
    Ok(
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

pub struct ProfileUpdate<'a> {
    pub name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub target_role: Option<&'a str>,
}

/// Updates only the provided fields.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: ProfileUpdate<'_>,
) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users SET
            name = COALESCE($2, name),
            phone = COALESCE($3, phone),
            target_role = COALESCE($4, target_role),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(update.name)
    .bind(update.phone)
    .bind(update.target_role)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

pub async fn set_resume(
    pool: &PgPool,
    user_id: Uuid,
    resume_key: &str,
    file_name: &str,
    data: &ResumeData,
) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>(
        r#"
        UPDATE users SET
            resume_key = $2,
            resume_file_name = $3,
            resume_data = $4,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(resume_key)
    .bind(file_name)
    .bind(Json(data))
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

pub async fn set_readiness_score(
    pool: &PgPool,
    user_id: Uuid,
    readiness_score: u32,
) -> Result<(), AppError> {
    sqlx::query("UPDATE users SET readiness_score = $2, updated_at = NOW() WHERE id = $1")
        .bind(user_id)
        .bind(readiness_score as i32)
        .execute(pool)
        .await?;
    Ok(())
}
