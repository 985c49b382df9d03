/**
 * Carousel Routes
 * Public hero slides and admin management, including one-step reordering
 */
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::db::models::{CarouselImagePatch, MoveDirection, NewCarouselImage};
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::routes::{required, required_if_present, SuccessResponse};
use crate::state::AppState;

/// Request body for POST /api/admin/carousel
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarouselRequest {
    pub image_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub order: i32,
    pub is_active: Option<bool>,
}

/// Request body for PUT /api/admin/carousel/{id}
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarouselRequest {
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Request body for POST /api/admin/carousel/{id}/move
#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateCarouselRequest {
    fn validate(self) -> Result<NewCarouselImage, ApiError> {
        Ok(NewCarouselImage {
            image_url: required("imageUrl", &self.image_url)?,
            title: optional_text(self.title),
            description: optional_text(self.description),
            order: self.order,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

impl UpdateCarouselRequest {
    fn validate(self) -> Result<CarouselImagePatch, ApiError> {
        Ok(CarouselImagePatch {
            image_url: required_if_present("imageUrl", self.image_url)?,
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
            order: self.order,
            is_active: self.is_active,
        })
    }
}

/// GET /api/carousel - Active images by ascending order
pub async fn list_active(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let images = state
        .store
        .list_active_carousel()
        .await
        .map_err(ApiError::store("list_active_carousel"))?;
    Ok(Json(images))
}

/// GET /api/admin/carousel
pub async fn list_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let images = state
        .store
        .list_carousel()
        .await
        .map_err(ApiError::store("list_carousel"))?;
    Ok(Json(images))
}

/// POST /api/admin/carousel
pub async fn create_image(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCarouselRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let image = state
        .store
        .create_carousel_image(payload.validate()?)
        .await
        .map_err(ApiError::store("create_carousel_image"))?;

    tracing::info!(image_id = image.id, order = image.order, "Carousel image created");
    Ok((StatusCode::CREATED, Json(image)))
}

/// PUT /api/admin/carousel/{id}
pub async fn update_image(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateCarouselRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let image = state
        .store
        .update_carousel_image(id, payload.validate()?)
        .await
        .map_err(ApiError::store("update_carousel_image"))?;
    Ok(Json(image))
}

/// POST /api/admin/carousel/{id}/move
pub async fn move_image(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<MoveRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let image = state
        .store
        .move_carousel_image(id, payload.direction)
        .await
        .map_err(ApiError::store("move_carousel_image"))?;

    tracing::debug!(image_id = id, order = image.order, "Carousel image moved");
    Ok(Json(image))
}

/// DELETE /api/admin/carousel/{id}
pub async fn delete_image(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_carousel_image(id)
        .await
        .map_err(ApiError::store("delete_carousel_image"))?;
    Ok(Json(SuccessResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, get_json, send};
    use serde_json::json;

    fn image(title: &str, order: i32) -> serde_json::Value {
        json!({
            "imageUrl": format!("https://img.example/{}.jpg", title),
            "title": title,
            "order": order
        })
    }

    fn titles(list: &serde_json::Value) -> Vec<String> {
        list.as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_public_list_sorted_by_order() {
        let app = app(AppState::in_memory());
        send(app.clone(), "POST", "/api/admin/carousel", Some(image("second", 1))).await;
        send(app.clone(), "POST", "/api/admin/carousel", Some(image("first", 0))).await;

        let (status, list) = get_json(app, "/api/carousel").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&list), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_inactive_images_hidden_from_public_list() {
        let app = app(AppState::in_memory());
        let mut hidden = image("hidden", 0);
        hidden["isActive"] = json!(false);
        send(app.clone(), "POST", "/api/admin/carousel", Some(hidden)).await;
        send(app.clone(), "POST", "/api/admin/carousel", Some(image("shown", 5))).await;

        let (_, public) = get_json(app.clone(), "/api/carousel").await;
        assert_eq!(titles(&public), vec!["shown"]);

        let (_, all) = get_json(app, "/api/admin/carousel").await;
        assert_eq!(titles(&all), vec!["hidden", "shown"]);
    }

    #[tokio::test]
    async fn test_create_defaults_order_and_active() {
        let app = app(AppState::in_memory());
        let (status, created) = send(
            app,
            "POST",
            "/api/admin/carousel",
            Some(json!({ "imageUrl": "https://img.example/a.jpg" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["order"], 0);
        assert_eq!(created["isActive"], true);
        assert!(created["title"].is_null());
    }

    #[tokio::test]
    async fn test_create_without_image_url_returns_400() {
        let app = app(AppState::in_memory());
        let (status, _) = send(
            app,
            "POST",
            "/api/admin/carousel",
            Some(json!({ "title": "No image" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_move_down_reorders_public_list() {
        let app = app(AppState::in_memory());
        let (_, first) = send(app.clone(), "POST", "/api/admin/carousel", Some(image("a", 0))).await;
        send(app.clone(), "POST", "/api/admin/carousel", Some(image("b", 1))).await;

        // Two steps down puts "a" after "b" (order 2 vs 1).
        for _ in 0..2 {
            let (status, _) = send(
                app.clone(),
                "POST",
                &format!("/api/admin/carousel/{}/move", first["id"]),
                Some(json!({ "direction": "down" })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, list) = get_json(app, "/api/carousel").await;
        assert_eq!(titles(&list), vec!["b", "a"]);
        assert_eq!(list[1]["order"], 2);
    }

    #[tokio::test]
    async fn test_move_rejects_unknown_direction_and_id() {
        let app = app(AppState::in_memory());
        let (_, created) = send(app.clone(), "POST", "/api/admin/carousel", Some(image("a", 0))).await;

        let (status, _) = send(
            app.clone(),
            "POST",
            &format!("/api/admin/carousel/{}/move", created["id"]),
            Some(json!({ "direction": "sideways" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            app,
            "POST",
            "/api/admin/carousel/404/move",
            Some(json!({ "direction": "up" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_and_delete_image() {
        let app = app(AppState::in_memory());
        let (_, created) = send(app.clone(), "POST", "/api/admin/carousel", Some(image("a", 0))).await;
        let uri = format!("/api/admin/carousel/{}", created["id"]);

        let (status, updated) = send(
            app.clone(),
            "PUT",
            &uri,
            Some(json!({ "order": 7, "description": "Night skyline" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["order"], 7);
        assert_eq!(updated["title"], "a");
        assert_eq!(updated["description"], "Night skyline");

        let (status, _) = send(app.clone(), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, all) = get_json(app, "/api/admin/carousel").await;
        assert_eq!(all, json!([]));
    }
}
