//! Request error taxonomy for the upload endpoint.
//!
//! Upload-validation failures are client errors reported before any
//! parsing happens; they serialize as `{"error": <message>}` with a
//! 400 status. Parse and analysis failures are server errors and
//! serialize as `{"success": false, "error": <message>}` with a 500
//! status. Per-feature analysis recovery never reaches this type.

use actix_web::{HttpResponse, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file uploaded")]
    MissingFilePart,
    #[error("No file selected")]
    EmptyFilename,
    #[error("Please upload a CSV file")]
    NotCsv,
    /// Malformed multipart stream or an oversized upload body.
    #[error("{0}")]
    Upload(String),
    /// UTF-8/CSV parse failure or any failure inside the analyzer path.
    #[error("{0}")]
    Analysis(String),
}

impl ApiError {
    pub fn analysis(err: anyhow::Error) -> Self {
        Self::Analysis(format!("{err:#}"))
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Analysis(message) => HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": message,
            })),
            other => HttpResponse::BadRequest().json(json!({
                "error": other.to_string(),
            })),
        }
    }
}
