use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure to obtain draw history from a source.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Upstream returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl DataSourceError {
    /// Classify a transport error, keeping timeouts distinct.
    pub fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataSourceError::Timeout
        } else if let Some(status) = err.status() {
            DataSourceError::Status(status.as_u16())
        } else {
            DataSourceError::Http(err)
        }
    }
}

/// The only error that leaves a prediction session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    #[error("Insufficient data: need at least {required} draws, got {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// HTTP boundary error.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Session(SessionError::DataSource(_)) => StatusCode::BAD_GATEWAY,
            AppError::Session(SessionError::InsufficientData { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Session(SessionError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
