//! API error type and the JSON body extractor that reports through it.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::routes::ErrorResponse;
use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing input.
    Validation(String),
    NotFound(&'static str),
    Unauthorized,
    PayloadTooLarge,
    /// Anything the caller cannot fix. Logged with the failing operation.
    Internal {
        operation: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Map a store failure, keeping not-found distinct from internal errors.
    pub fn store(operation: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| match source {
            StoreError::NotFound { entity, .. } => ApiError::NotFound(entity),
            source => ApiError::Internal { operation, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(message) => ErrorResponse {
                error: "Invalid request data".to_string(),
                message: Some(message),
            },
            ApiError::NotFound(entity) => ErrorResponse {
                error: "Not found".to_string(),
                message: Some(format!("{} not found", entity)),
            },
            ApiError::Unauthorized => ErrorResponse {
                error: "Invalid credentials".to_string(),
                message: None,
            },
            ApiError::PayloadTooLarge => ErrorResponse {
                error: "Request body too large".to_string(),
                message: None,
            },
            ApiError::Internal { operation, source } => {
                tracing::error!(operation, error = %source, "request failed");
                ErrorResponse {
                    error: "Internal server error".to_string(),
                    message: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// `Path` extractor that reports unparseable segments (`/news/abc`) as a
/// 400 [`ApiError::Validation`] with the JSON error body.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `Json` extractor whose rejections (bad syntax, wrong types, missing
/// fields, wrong content type) surface as 400 [`ApiError::Validation`].
/// Bodies over the size limit stay 413.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = ApiError::store("update_news")(StoreError::not_found("news_article", 7));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        let err = ApiError::store("list_news")(StoreError::Other("boom".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        match err {
            ApiError::Internal { operation, .. } => assert_eq!(operation, "list_news"),
            other => panic!("expected internal error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            ApiError::validation("email is required").status(),
            StatusCode::BAD_REQUEST
        );
    }
}
