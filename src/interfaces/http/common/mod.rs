//! Shared HTTP plumbing: response envelope, error mapping, extractors.

pub mod form_payload;
pub mod request_context;

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{AppError, DomainError, FieldErrors};
use crate::support::pagination::PaginatedResult;

pub use form_payload::FormPayload;
pub use request_context::{MediaContext, RequestContext};

/// Standard API response envelope.
///
/// Success: `{"success": true, "data": {...}}`.
/// Failure: `{"success": false, "data": null, "error": "...", "errors": {"field": ["..."]}}`,
/// where `errors` is present only for validation failures.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Messages per request field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            errors: None,
        }
    }

    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            success: false,
            data: None,
            error: Some("Validation failed".to_string()),
            errors: Some(errors.into_inner()),
        }
    }
}

/// A page of items plus paging metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Items across all pages
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(limit as u64) as u32
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn from_result<U>(result: PaginatedResult<U>, render: impl FnMut(U) -> T) -> Self {
        let PaginatedResult {
            items,
            total,
            page,
            limit,
            ..
        } = result;
        Self::new(items.into_iter().map(render).collect(), total, page, limit)
    }
}

/// Error returned by handlers and extractors; renders as an [`ApiResponse`].
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Validation(FieldErrors),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(errors) => ApiError::Validation(errors),
            e @ DomainError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            DomainError::Conflict(message) => ApiError::Conflict(message),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Domain(e) => e.into(),
            AppError::Infra(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, ApiResponse::<()>::error(message)),
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, ApiResponse::validation(errors)),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, ApiResponse::error(message)),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, ApiResponse::error(message)),
            ApiError::Internal(detail) => {
                error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Internal server error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
