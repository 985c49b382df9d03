/**
 * Site Content Routes
 * Public section reads and the admin read-modify-write endpoints
 */
use axum::{
    extract::State,
    response::IntoResponse,
    Json,
};

use crate::content::SiteSection;
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::state::AppState;

/// GET /api/content/{key}
pub async fn get_content(
    State(state): State<AppState>,
    ApiPath(key): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    match state
        .store
        .get_content(&key)
        .await
        .map_err(ApiError::store("get_content"))?
    {
        Some(content) => Ok(Json(content)),
        None => {
            tracing::debug!(key = %key, "Content key not found");
            Err(ApiError::NotFound("content"))
        }
    }
}

/// GET /api/admin/content
pub async fn list_content(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let content = state
        .store
        .list_content()
        .await
        .map_err(ApiError::store("list_content"))?;
    Ok(Json(content))
}

/// PUT /api/admin/content
/// Body: `{"key": "hero" | "stats" | "about", "content": {...}}`
pub async fn update_content(
    State(state): State<AppState>,
    ApiJson(section): ApiJson<SiteSection>,
) -> Result<impl IntoResponse, ApiError> {
    let content = state
        .store
        .upsert_content(&section)
        .await
        .map_err(ApiError::store("upsert_content"))?;

    tracing::info!(key = %content.key, "Site content updated");
    Ok(Json(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{get_json, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_upsert_then_public_get_returns_document() {
        let app = crate::routes::test_support::app(AppState::in_memory());

        let (status, _) = send(
            app.clone(),
            "PUT",
            "/api/admin/content",
            Some(json!({ "key": "hero", "content": { "title": "X" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get_json(app, "/api/content/hero").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["key"], "hero");
        assert_eq!(body["content"], json!({ "title": "X" }));
        assert!(body["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_get_unknown_key_returns_404() {
        let app = crate::routes::test_support::app(AppState::in_memory());
        let (status, _) = get_json(app, "/api/content/hero").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_section() {
        let app = crate::routes::test_support::app(AppState::in_memory());
        let (status, body) = send(
            app.clone(),
            "PUT",
            "/api/admin/content",
            Some(json!({ "key": "footer", "content": { "title": "X" } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (_, listed) = get_json(app, "/api/admin/content").await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_update_rejects_malformed_document() {
        let app = crate::routes::test_support::app(AppState::in_memory());
        let (status, _) = send(
            app,
            "PUT",
            "/api/admin/content",
            Some(json!({ "key": "stats", "content": { "uptime": 99 } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_with_null_field_returns_400_and_keeps_stored_document() {
        let app = crate::routes::test_support::app(AppState::in_memory());
        send(
            app.clone(),
            "PUT",
            "/api/admin/content",
            Some(json!({ "key": "hero", "content": { "title": "X", "subtitle": "Y" } })),
        )
        .await;

        let (status, body) = send(
            app.clone(),
            "PUT",
            "/api/admin/content",
            Some(json!({ "key": "hero", "content": { "title": "X", "subtitle": null } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request data");

        let (_, stored) = get_json(app, "/api/content/hero").await;
        assert_eq!(stored["content"], json!({ "title": "X", "subtitle": "Y" }));
    }

    #[tokio::test]
    async fn test_repeated_updates_keep_one_row_per_key() {
        let app = crate::routes::test_support::app(AppState::in_memory());
        for title in ["A", "B"] {
            let (status, _) = send(
                app.clone(),
                "PUT",
                "/api/admin/content",
                Some(json!({ "key": "about", "content": { "title": title } })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, listed) = get_json(app, "/api/admin/content").await;
        let rows = listed.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["content"]["title"], "B");
    }
}
