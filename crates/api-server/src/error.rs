//! API error responses

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use tasks_core::import::ImportError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded.")]
    MissingFile,

    #[error("Only CSV files are allowed!")]
    NotCsv,

    #[error("File too large: limit is {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Error parsing CSV file: {0}")]
    Parse(String),

    #[error("Error importing tasks.")]
    Store(#[source] tasks_core::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::NotCsv | Self::Parse(_) => StatusCode::BAD_REQUEST,
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Multipart(e) => e.status(),
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Parse { row, source } => Self::Parse(format!("row {}: {}", row, source)),
            ImportError::Store(source) => Self::Store(source),
        }
    }
}

impl From<tasks_core::Error> for ApiError {
    fn from(err: tasks_core::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                Self::Store(source) => tracing::error!("Task store failure: {}", source),
                other => tracing::error!("{}", other),
            }
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
