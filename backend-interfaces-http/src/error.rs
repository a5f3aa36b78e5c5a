use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use backend_application::{AppError, ScanError};

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    BadRequest(String),
    NotFound(String),
    Internal(String),
    Scan(ScanError),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        match value {
            AppError::Unauthorized => HttpError::Unauthorized,
            AppError::BadRequest(msg) => HttpError::BadRequest(msg),
            AppError::NotFound(what) => HttpError::NotFound(what),
            AppError::Internal(err) => HttpError::Internal(err.to_string()),
        }
    }
}

impl From<ScanError> for HttpError {
    fn from(value: ScanError) -> Self {
        HttpError::Scan(value)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_km: Option<f64>,
}

fn scan_status(err: &ScanError) -> StatusCode {
    match err {
        ScanError::MalformedScan(_) => StatusCode::BAD_REQUEST,
        ScanError::Unauthenticated => StatusCode::UNAUTHORIZED,
        ScanError::UnknownEvent(_) => StatusCode::NOT_FOUND,
        ScanError::ScanInProgress => StatusCode::CONFLICT,
        ScanError::DateIneligible { .. } | ScanError::OutOfRange { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ScanError::LocationUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ScanError::RecordRead(_) | ScanError::RecordWrite(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    error: "unauthorized".to_string(),
                    kind: None,
                    distance_km: None,
                },
            ),
            HttpError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: format!("bad request: {}", msg),
                    kind: None,
                    distance_km: None,
                },
            ),
            HttpError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: format!("{} not found", what),
                    kind: None,
                    distance_km: None,
                },
            ),
            HttpError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: msg,
                    kind: None,
                    distance_km: None,
                },
            ),
            HttpError::Scan(err) => (
                scan_status(&err),
                ErrorBody {
                    error: err.to_string(),
                    kind: Some(err.kind()),
                    distance_km: err.distance_km(),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
