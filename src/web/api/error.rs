use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogError;
use crate::config::Permission;
use crate::tracker::TrackerError;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(&'static str),
    Forbidden(Permission),
    Validation(String),
    NotFound(&'static str),
    Internal {
        error: &'static str,
        message: String,
    },
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::InvalidFormat | CatalogError::InvalidTle { .. } => {
                ApiError::Validation(e.to_string())
            }
            _ => ApiError::Internal {
                error: "catalog_error",
                message: e.to_string(),
            },
        }
    }
}

impl From<TrackerError> for ApiError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::Observer(e) => ApiError::Validation(e.to_string()),
            TrackerError::Catalog(e) => e.into(),
            TrackerError::AlreadyRunning => ApiError::Internal {
                error: "tracker_error",
                message: e.to_string(),
            },
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Unauthorized(reason) | ApiError::NotFound(reason) => {
                ErrorResponse::new(reason)
            }
            ApiError::Forbidden(permission) => ErrorResponse::with_message(
                "forbidden",
                &format!("requires {}", permission.as_str()),
            ),
            ApiError::Validation(msg) => ErrorResponse::with_message("validation_failed", &msg),
            ApiError::Internal { error, message } => ErrorResponse::with_message(error, &message),
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: None,
        }
    }

    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
