use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Prediction(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{message}")]
    Proxy {
        message: &'static str,
        #[source]
        source: Box<AppError>,
    },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Short failure kind used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Auth(_) => "auth",
            AppError::Upstream { .. } => "upstream",
            AppError::Prediction(_) => "prediction",
            AppError::Network(_) => "network",
            AppError::Timeout(_) => "timeout",
            AppError::Validation(_) => "validation",
            AppError::Proxy { source, .. } => source.kind(),
            AppError::Internal(_) => "internal",
        }
    }

    /// Hide the failure behind a generic message. Validation errors are the
    /// caller's fault and pass through untouched.
    pub fn proxied(self, message: &'static str) -> AppError {
        match self {
            AppError::Validation(_) | AppError::Proxy { .. } => self,
            other => AppError::Proxy {
                message,
                source: Box::new(other),
            },
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Timeout(e.to_string())
        } else {
            AppError::Network(e.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Proxy { message, ref source } => {
                tracing::error!(kind, "{}: {}", message, source);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            AppError::Internal(ref e) => {
                tracing::error!(kind, "Internal error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            ref other => {
                tracing::error!(kind, "Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
