use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use plategate::SubmissionError;
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Submission rejected: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Submission(err) => StatusCode::from_u16(err.kind().status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ServerError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::Submission(err) => err.kind().code(),
            ServerError::Unavailable(_) => "SERVICE_UNAVAILABLE",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }

    /// Message returned to the client. Submission rejections only carry the
    /// coarse reason a camera can act on.
    fn public_message(&self) -> String {
        match self {
            ServerError::Submission(err) => err.public_message(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.public_message();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "status": status.as_u16(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<plategate::ConfigError> for ServerError {
    fn from(err: plategate::ConfigError) -> Self {
        ServerError::Config(err.to_string())
    }
}
