/**
 * News Routes
 * Public published list and admin CRUD for news articles
 */
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::db::models::{NewNewsArticle, NewsArticlePatch};
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::routes::{required, required_if_present, SuccessResponse};
use crate::state::AppState;

// ============================================================================
// Request Types
// ============================================================================

/// Request body for POST /api/admin/news
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

/// Request body for PUT /api/admin/news/{id}
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

// ============================================================================
// Validation
// ============================================================================

/// Sanitize editor HTML using ammonia
fn sanitize_html(html: &str) -> String {
    ammonia::clean(html)
}

impl CreateNewsRequest {
    fn validate(self) -> Result<NewNewsArticle, ApiError> {
        Ok(NewNewsArticle {
            title: required("title", &self.title)?,
            excerpt: sanitize_html(&required("excerpt", &self.excerpt)?),
            content: sanitize_html(&required("content", &self.content)?),
            image_url: self
                .image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            is_published: self.is_published.unwrap_or(true),
        })
    }
}

impl UpdateNewsRequest {
    fn validate(self) -> Result<NewsArticlePatch, ApiError> {
        Ok(NewsArticlePatch {
            title: required_if_present("title", self.title)?,
            excerpt: required_if_present("excerpt", self.excerpt)?.map(|e| sanitize_html(&e)),
            content: required_if_present("content", self.content)?.map(|c| sanitize_html(&c)),
            image_url: self.image_url.map(|url| url.trim().to_string()),
            is_published: self.is_published,
        })
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/news - Published articles, newest first
pub async fn list_published(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let news = state
        .store
        .list_published_news()
        .await
        .map_err(ApiError::store("list_published_news"))?;
    Ok(Json(news))
}

/// GET /api/admin/news - All articles, newest first
pub async fn list_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let news = state
        .store
        .list_news()
        .await
        .map_err(ApiError::store("list_news"))?;
    Ok(Json(news))
}

/// POST /api/admin/news
pub async fn create_article(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateNewsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let article = state
        .store
        .create_news(payload.validate()?)
        .await
        .map_err(ApiError::store("create_news"))?;

    tracing::info!(article_id = article.id, "News article created");
    Ok((StatusCode::CREATED, Json(article)))
}

/// PUT /api/admin/news/{id} - Partial update
pub async fn update_article(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateNewsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let article = state
        .store
        .update_news(id, payload.validate()?)
        .await
        .map_err(ApiError::store("update_news"))?;
    Ok(Json(article))
}

/// DELETE /api/admin/news/{id}
pub async fn delete_article(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_news(id)
        .await
        .map_err(ApiError::store("delete_news"))?;
    Ok(Json(SuccessResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, get_json, send};
    use serde_json::json;

    fn article(title: &str, published: bool) -> serde_json::Value {
        json!({
            "title": title,
            "excerpt": "Short",
            "content": "Body",
            "imageUrl": "https://img.example/news.jpg",
            "isPublished": published
        })
    }

    #[test]
    fn test_sanitize_strips_scripts() {
        let clean = sanitize_html("<p>Hi</p><script>alert(1)</script>");
        assert!(clean.contains("<p>Hi</p>"));
        assert!(!clean.contains("script"));
    }

    #[tokio::test]
    async fn test_create_then_list_all_includes_article() {
        let app = app(AppState::in_memory());
        let (status, created) =
            send(app.clone(), "POST", "/api/admin/news", Some(article("Launch", true))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created["id"].is_number());
        assert!(created["publishedAt"].is_string());

        let (status, all) = get_json(app, "/api/admin/news").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all[0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_public_list_hides_unpublished() {
        let app = app(AppState::in_memory());
        send(app.clone(), "POST", "/api/admin/news", Some(article("Public", true))).await;
        send(app.clone(), "POST", "/api/admin/news", Some(article("Draft", false))).await;

        let (_, public) = get_json(app.clone(), "/api/news").await;
        let titles: Vec<&str> = public
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Public"]);

        let (_, all) = get_json(app, "/api/admin/news").await;
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_without_title_returns_400() {
        let app = app(AppState::in_memory());
        let mut body = article("x", true);
        body["title"] = json!("");
        let (status, _) = send(app, "POST", "/api/admin/news", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_partial_update_and_unpublish() {
        let app = app(AppState::in_memory());
        let (_, created) =
            send(app.clone(), "POST", "/api/admin/news", Some(article("Launch", true))).await;
        let uri = format!("/api/admin/news/{}", created["id"]);

        let (status, updated) = send(
            app.clone(),
            "PUT",
            &uri,
            Some(json!({ "isPublished": false, "imageUrl": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Launch");
        assert_eq!(updated["isPublished"], false);
        assert!(updated["imageUrl"].is_null());

        let (_, public) = get_json(app, "/api/news").await;
        assert_eq!(public, json!([]));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id_return_404() {
        let app = app(AppState::in_memory());
        let (status, _) = send(
            app.clone(),
            "PUT",
            "/api/admin/news/77",
            Some(json!({ "title": "x" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(app.clone(), "DELETE", "/api/admin/news/77", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(app, "DELETE", "/api/admin/news/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request data");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_delete_removes_article() {
        let app = app(AppState::in_memory());
        let (_, created) =
            send(app.clone(), "POST", "/api/admin/news", Some(article("Gone", true))).await;
        let uri = format!("/api/admin/news/{}", created["id"]);

        let (status, body) = send(app.clone(), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, all) = get_json(app, "/api/admin/news").await;
        assert_eq!(all, json!([]));
    }
}
