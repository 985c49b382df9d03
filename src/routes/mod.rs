/**
 * Routes Module
 * API route handlers
 */
use serde::{Deserialize, Serialize};

pub mod auth;
pub mod carousel;
pub mod content;
pub mod health;
pub mod messages;
pub mod news;
pub mod services;

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Success response (for delete and flag updates)
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Trimmed value of a required text field, or a validation message naming it.
pub(crate) fn required(field: &str, value: &str) -> Result<String, crate::error::ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(crate::error::ApiError::validation(format!(
            "{} is required",
            field
        )));
    }
    Ok(trimmed.to_string())
}

/// Like [`required`], for a field that may be absent from a partial update.
pub(crate) fn required_if_present(
    field: &str,
    value: Option<String>,
) -> Result<Option<String>, crate::error::ApiError> {
    value.map(|v| required(field, &v)).transpose()
}
