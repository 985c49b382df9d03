/**
 * Contact Message Routes
 * Public contact form submission and the admin inbox
 */
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use regex::Regex;
use serde::Deserialize;

use crate::db::models::NewContactMessage;
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::routes::{required, SuccessResponse};
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Request body for POST /api/contact
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

// ============================================================================
// Validation
// ============================================================================

lazy_static::lazy_static! {
    /// Loose address shape: something@domain.tld, no whitespace.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

impl ContactRequest {
    fn validate(self) -> Result<NewContactMessage, ApiError> {
        let email = required("email", &self.email)?;
        if !is_valid_email(&email) {
            return Err(ApiError::validation("email is not a valid address"));
        }
        Ok(NewContactMessage {
            name: required("name", &self.name)?,
            email,
            subject: required("subject", &self.subject)?,
            message: required("message", &self.message)?,
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/contact
pub async fn create_message(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let message = state
        .store
        .create_message(payload.validate()?)
        .await
        .map_err(ApiError::store("create_message"))?;

    tracing::info!(message_id = message.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/admin/messages
pub async fn list_messages(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let messages = state
        .store
        .list_messages()
        .await
        .map_err(ApiError::store("list_messages"))?;
    Ok(Json(messages))
}

/// PUT /api/admin/messages/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .mark_message_read(id)
        .await
        .map_err(ApiError::store("mark_message_read"))?;
    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/admin/messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_message(id)
        .await
        .map_err(ApiError::store("delete_message"))?;
    Ok(Json(SuccessResponse { success: true }))
}
