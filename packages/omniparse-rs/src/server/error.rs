use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use omniparse_detect::DetectError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Element not found")]
    NoMatch,
    #[error(transparent)]
    Detect(#[from] DetectError),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NoMatch => StatusCode::NOT_FOUND,
            ApiError::Detect(DetectError::ImageNotFound(_) | DetectError::ImageDecode(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Detect(DetectError::NoBoundingBox | DetectError::Backend(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::NoMatch, StatusCode::NOT_FOUND),
            (DetectError::ImageNotFound(PathBuf::from("a.png")).into(), StatusCode::BAD_REQUEST),
            (DetectError::ImageDecode("bad".into()).into(), StatusCode::BAD_REQUEST),
            (DetectError::NoBoundingBox.into(), StatusCode::INTERNAL_SERVER_ERROR),
            (DetectError::Backend("down".into()).into(), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }
}
