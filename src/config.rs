use std::env;

use reqwest::Url;

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_SESSION_DB: &str = "sqlite://school_admin_session.db";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: Url,
    pub session_db: String,
}

impl ClientConfig {
    pub fn new(api_url: &str, session_db: impl Into<String>) -> Result<Self, AppError> {
        let api_url = Url::parse(api_url)
            .map_err(|e| AppError::Config(format!("SCHOOL_API_URL is not a valid URL: {}", e)))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "SCHOOL_API_URL must be http or https, got {}",
                api_url.scheme()
            )));
        }

        Ok(Self {
            api_url,
            session_db: session_db.into(),
        })
    }

    /// Reads `SCHOOL_API_URL` and `SESSION_DB`, falling back to the local
    /// development defaults.
    pub fn new_from_env() -> Result<Self, AppError> {
        let api_url = env::var("SCHOOL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let session_db = env::var("SESSION_DB").unwrap_or_else(|_| DEFAULT_SESSION_DB.to_string());
        Self::new(&api_url, session_db)
    }
}
