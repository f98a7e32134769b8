use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::coach::InterviewCoach;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Pluggable coach. Default: HeuristicCoach. Swap via COACH_BACKEND.
    pub coach: Arc<dyn InterviewCoach>,
}
