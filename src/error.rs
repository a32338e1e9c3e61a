use serde::Serialize;
use thiserror::Error;

use crate::routing::RoutingError;
use crate::views::ViewError;

/// Fallback shown to the user when the server gives no detail.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Stored session is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Malformed access token: {0}")]
    MalformedToken(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Session expired")]
    Unauthorized { detail: Option<String> },

    #[error("Request rejected ({status})")]
    Client { status: u16, detail: Option<String> },

    #[error("Server error ({status})")]
    Server { status: u16, detail: Option<String> },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Detail string the server attached to the failure, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail }
            | ApiError::Client { detail, .. }
            | ApiError::Server { detail, .. } => detail.as_deref(),
            ApiError::InvalidUpload(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Text for the blocking failure notice.
    pub fn user_message(&self) -> String {
        self.detail()
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Machine-readable error line printed by the shell with `--json`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let kind = match err {
            AppError::Config(_) => "config",
            AppError::Api(ApiError::Unauthorized { .. }) => "unauthorized",
            AppError::Api(_) => "api",
            AppError::Session(_) => "session",
            AppError::Routing(_) => "routing",
            AppError::View(_) => "view",
            AppError::Io(_) => "io",
            AppError::BadRequest(_) => "bad_request",
        };
        let message = match err {
            AppError::Api(e) => e.user_message(),
            AppError::View(ViewError::Api(e)) => e.user_message(),
            other => other.to_string(),
        };
        ErrorResponse {
            error: kind.to_string(),
            message,
        }
    }
}
