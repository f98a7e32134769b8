pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::interview::handlers as interview;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        .route("/api/v1/auth/me", get(auth::handle_me))
        .route("/api/v1/auth/profile", put(auth::handle_update_profile))
        // Interviews
        .route(
            "/api/v1/interviews",
            post(interview::handle_start).get(interview::handle_list),
        )
        .route("/api/v1/interviews/:id", get(interview::handle_get))
        .route(
            "/api/v1/interviews/:id/answers",
            post(interview::handle_submit_answer),
        )
        .route(
            "/api/v1/interviews/:id/complete",
            post(interview::handle_complete),
        )
        .route(
            "/api/v1/analytics/dashboard",
            get(interview::handle_dashboard),
        )
        .route("/api/v1/questions", get(interview::handle_list_questions))
        // Resume
        .route(
            "/api/v1/resume",
            post(resume::handle_upload_resume)
                .get(resume::handle_get_resume)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/api/v1/resume/analysis",
            get(resume::handle_resume_analysis),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use aws_sdk_s3::config::{BehaviorVersion, Region};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::auth::token::issue_token;
    use crate::coach::HeuristicCoach;
    use crate::config::{CoachBackend, Config};

    const SECRET: &str = "router-test-secret";

    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost:1/never".to_string(),
            s3_bucket: "resumes".to_string(),
            s3_endpoint: "http://localhost:9000".to_string(),
            aws_access_key_id: "minio".to_string(),
            aws_secret_access_key: "minio123".to_string(),
            jwt_secret: SECRET.to_string(),
            jwt_expiry_days: 30,
            max_upload_bytes: 1024,
            coach_backend: CoachBackend::Heuristic,
            anthropic_api_key: None,
            llm_api_url: None,
            port: 0,
            rust_log: "info".to_string(),
        };
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool");
        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        AppState {
            db,
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            config,
            coach: Arc::new(HeuristicCoach),
        }
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "interview-api");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        for (method, uri) in [
            ("GET", "/api/v1/auth/me"),
            ("GET", "/api/v1/interviews"),
            ("GET", "/api/v1/analytics/dashboard"),
            ("GET", "/api/v1/resume"),
            ("GET", "/api/v1/questions"),
        ] {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let (status, body) = send(request).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        }
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let request = Request::get("/api/v1/interviews")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_oversized_resume_upload_is_413() {
        let token = issue_token(uuid::Uuid::new_v4(), SECRET, 1).unwrap();
        let mut body = b"--XBOUNDARY\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\nContent-Type: application/pdf\r\n\r\n".to_vec();
        body.extend(std::iter::repeat(b'a').take(4096));
        body.extend_from_slice(b"\r\n--XBOUNDARY--\r\n");

        let request = Request::post("/api/v1/resume")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_question_bank_listing_with_token() {
        let token = issue_token(uuid::Uuid::new_v4(), SECRET, 1).unwrap();
        let request = Request::get("/api/v1/questions?job_role=Data%20Scientist&category=Technical")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        let questions = body.as_array().unwrap();
        assert!(!questions.is_empty());
        assert!(questions
            .iter()
            .all(|q| q["job_role"] == "Data Scientist" && q["category"] == "Technical"));
    }
}
