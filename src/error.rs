use crate::engine::EngineError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Error reading input files: {0}")]
    InputRead(String),

    #[error("Failed to store font '{file_name}': {message}")]
    Storage { file_name: String, message: String },

    #[error("Failed to list fonts: {0}")]
    FontListing(String),

    #[error("Engine configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("PDF generation failed: {0}")]
    Transform(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InputRead(_) => StatusCode::BAD_REQUEST,
            Self::Storage { .. }
            | Self::FontListing(_)
            | Self::ConfigNotFound(_)
            | Self::Transform(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for ServiceError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::ConfigNotFound(path) => Self::ConfigNotFound(path),
            other => Self::Transform(other.to_string()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!("{}", message);
        } else {
            tracing::warn!("Rejected request: {}", message);
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
