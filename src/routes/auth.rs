/**
 * Authentication Routes
 * Admin credential check against the bcrypt hashes in admin_users
 */
use axum::{extract::State, response::IntoResponse, Json};
use bcrypt::verify;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiJson};
use crate::routes::required;
use crate::state::AppState;
use crate::store::StoreError;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub admin_id: i32,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/admin/login
///
/// Unknown usernames and wrong passwords get the same 401 body.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = required("username", &payload.username)?;
    if payload.password.is_empty() {
        return Err(ApiError::validation("password is required"));
    }

    let admin = match state
        .store
        .find_admin(&username)
        .await
        .map_err(ApiError::store("find_admin"))?
    {
        Some(admin) => admin,
        None => {
            tracing::warn!(username = %username, "Login attempt for unknown admin");
            return Err(ApiError::Unauthorized);
        }
    };

    // bcrypt is CPU-bound; keep it off the async workers.
    let stored_hash = admin.password.clone();
    let password = payload.password;
    let valid = match tokio::task::spawn_blocking(move || verify(&password, &stored_hash)).await {
        Ok(Ok(valid)) => valid,
        Ok(Err(e)) => {
            return Err(ApiError::Internal {
                operation: "verify_password",
                source: StoreError::Other(e.to_string()),
            })
        }
        Err(e) => {
            return Err(ApiError::Internal {
                operation: "verify_password",
                source: StoreError::Other(format!("spawn_blocking failed: {}", e)),
            })
        }
    };

    if !valid {
        tracing::warn!(username = %username, "Login failed: wrong password");
        return Err(ApiError::Unauthorized);
    }

    tracing::info!(admin_id = admin.id, "Admin logged in");
    Ok(Json(LoginResponse {
        success: true,
        admin_id: admin.id,
    }))
}
