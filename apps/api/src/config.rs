use anyhow::{bail, Context, Result};

/// Which coaching backend scores answers and generates questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachBackend {
    Heuristic,
    Llm,
}

impl CoachBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "heuristic" => Ok(CoachBackend::Heuristic),
            "llm" => Ok(CoachBackend::Llm),
            other => bail!("COACH_BACKEND must be 'heuristic' or 'llm', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub jwt_secret: String,
    pub jwt_expiry_days: i64,
    pub max_upload_bytes: usize,
    pub coach_backend: CoachBackend,
    pub anthropic_api_key: Option<String>,
    /// Overrides the Messages API endpoint (proxies, local gateways).
    pub llm_api_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let coach_backend = CoachBackend::parse(
            &std::env::var("COACH_BACKEND").unwrap_or_else(|_| "heuristic".to_string()),
        )?;
        let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY").ok();
        if coach_backend == CoachBackend::Llm && anthropic_api_key.is_none() {
            bail!("ANTHROPIC_API_KEY is required when COACH_BACKEND=llm");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            jwt_secret: require_env("JWT_SECRET")?,
            jwt_expiry_days: parse_env("JWT_EXPIRY_DAYS", 30)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            coach_backend,
            anthropic_api_key,
            llm_api_url: std::env::var("LLM_API_URL").ok(),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse_is_case_insensitive() {
        assert_eq!(CoachBackend::parse("LLM").unwrap(), CoachBackend::Llm);
        assert_eq!(
            CoachBackend::parse(" heuristic ").unwrap(),
            CoachBackend::Heuristic
        );
    }

    #[test]
    fn test_backend_parse_rejects_unknown() {
        assert!(CoachBackend::parse("openai").is_err());
    }
}
