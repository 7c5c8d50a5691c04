//! Error types and the uniform HTTP error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Numeric codes carried in error responses.
pub mod error_codes {
    pub const VALIDATION_ERROR: i32 = 1001;
    pub const UPSTREAM_STATUS: i32 = 1101;
    pub const UPSTREAM_TRANSPORT: i32 = 1102;
    pub const RETRIES_EXHAUSTED: i32 = 1103;
    pub const PARSE_ERROR: i32 = 1201;
    pub const CONFIG_ERROR: i32 = 1301;
    pub const INTERNAL_ERROR: i32 = 1500;
}

/// All errors that can occur in the server.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid response from {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Cannot reach {target} after {attempts} attempt(s): {last}")]
    RetriesExhausted {
        target: String,
        attempts: u32,
        last: String,
    },

    #[error("Parse error from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        match self {
            ServerError::Validation(_) => VALIDATION_ERROR,
            ServerError::Status { .. } => UPSTREAM_STATUS,
            ServerError::Transport(_) => UPSTREAM_TRANSPORT,
            ServerError::RetriesExhausted { .. } => RETRIES_EXHAUSTED,
            ServerError::Parse { .. } => PARSE_ERROR,
            ServerError::Config(_) => CONFIG_ERROR,
            ServerError::Io(_) => INTERNAL_ERROR,
        }
    }

    /// Coarse category reported to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::Validation(_) => "validation",
            ServerError::Status { .. }
            | ServerError::Transport(_)
            | ServerError::RetriesExhausted { .. } => "connectivity",
            ServerError::Parse { .. } => "parse",
            ServerError::Config(_) => "config",
            ServerError::Io(_) => "internal",
        }
    }

    /// Only connectivity failures of a single attempt are worth another try.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServerError::Status { .. } | ServerError::Transport(_))
    }

    /// Upstream problems map to 502; everything else is our own fault.
    pub fn http_status(&self) -> StatusCode {
        match self.kind() {
            "validation" | "connectivity" | "parse" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.code(),
                "kind": self.kind(),
                "message": self.to_string(),
            }
        })
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(code = self.code(), kind = self.kind(), "Request failed: {self}");
        (self.http_status(), Json(self.to_json())).into_response()
    }
}

impl From<fizz_subtext::TransformError> for ServerError {
    fn from(e: fizz_subtext::TransformError) -> Self {
        ServerError::Validation(e.to_string())
    }
}

impl From<reqwest::Error> for ServerError {
    fn from(e: reqwest::Error) -> Self {
        ServerError::Transport(e.to_string())
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
