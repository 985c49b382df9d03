/**
 * Service Routes
 * Public active list and admin CRUD for offered services
 */
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::db::models::{NewService, ServiceColor, ServiceIcon, ServicePatch};
use crate::error::{ApiError, ApiJson, ApiPath};
use crate::routes::{required, required_if_present, SuccessResponse};
use crate::state::AppState;

/// Request body for POST /api/admin/services
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    pub icon: ServiceIcon,
    pub color: ServiceColor,
    pub is_active: Option<bool>,
}

/// Request body for PUT /api/admin/services/{id}
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub icon: Option<ServiceIcon>,
    pub color: Option<ServiceColor>,
    pub is_active: Option<bool>,
}

/// Trim features and drop blanks; the admin form sends a split comma list.
fn clean_features(features: Vec<String>) -> Result<Vec<String>, ApiError> {
    let cleaned: Vec<String> = features
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();
    if cleaned.is_empty() {
        return Err(ApiError::validation("at least one feature is required"));
    }
    Ok(cleaned)
}

impl CreateServiceRequest {
    fn validate(self) -> Result<NewService, ApiError> {
        Ok(NewService {
            name: required("name", &self.name)?,
            description: required("description", &self.description)?,
            features: clean_features(self.features)?,
            icon: self.icon,
            color: self.color,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

impl UpdateServiceRequest {
    fn validate(self) -> Result<ServicePatch, ApiError> {
        Ok(ServicePatch {
            name: required_if_present("name", self.name)?,
            description: required_if_present("description", self.description)?,
            features: self.features.map(clean_features).transpose()?,
            icon: self.icon,
            color: self.color,
            is_active: self.is_active,
        })
    }
}

/// GET /api/services
pub async fn list_active(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let services = state
        .store
        .list_active_services()
        .await
        .map_err(ApiError::store("list_active_services"))?;
    Ok(Json(services))
}

/// GET /api/admin/services
pub async fn list_all(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let services = state
        .store
        .list_services()
        .await
        .map_err(ApiError::store("list_services"))?;
    Ok(Json(services))
}

/// POST /api/admin/services
pub async fn create_service(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateServiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state
        .store
        .create_service(payload.validate()?)
        .await
        .map_err(ApiError::store("create_service"))?;

    tracing::info!(service_id = service.id, "Service created");
    Ok((StatusCode::CREATED, Json(service)))
}

/// PUT /api/admin/services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateServiceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state
        .store
        .update_service(id, payload.validate()?)
        .await
        .map_err(ApiError::store("update_service"))?;
    Ok(Json(service))
}

/// DELETE /api/admin/services/{id}
pub async fn delete_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .store
        .delete_service(id)
        .await
        .map_err(ApiError::store("delete_service"))?;
    Ok(Json(SuccessResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, get_json, send};
    use serde_json::json;

    fn service(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "description": "Reliable delivery",
            "features": ["Global reach", " ", "API"],
            "icon": "MessageSquare",
            "color": "emerald"
        })
    }

    #[tokio::test]
    async fn test_create_cleans_features_and_defaults_active() {
        let app = app(AppState::in_memory());
        let (status, created) =
            send(app, "POST", "/api/admin/services", Some(service("SMS"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["features"], json!(["Global reach", "API"]));
        assert_eq!(created["isActive"], true);
        assert_eq!(created["icon"], "MessageSquare");
    }

    #[tokio::test]
    async fn test_unknown_icon_returns_400() {
        let app = app(AppState::in_memory());
        let mut body = service("SMS");
        body["icon"] = json!("Rocket");
        let (status, _) = send(app, "POST", "/api/admin/services", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_deactivated_service_hidden_from_public_list() {
        let app = app(AppState::in_memory());
        let (_, sms) = send(app.clone(), "POST", "/api/admin/services", Some(service("SMS"))).await;
        send(app.clone(), "POST", "/api/admin/services", Some(service("Voice"))).await;

        let (status, updated) = send(
            app.clone(),
            "PUT",
            &format!("/api/admin/services/{}", sms["id"]),
            Some(json!({ "isActive": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "SMS");

        let (_, public) = get_json(app.clone(), "/api/services").await;
        let names: Vec<&str> = public
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Voice"]);

        let (_, all) = get_json(app, "/api/admin/services").await;
        assert_eq!(all.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_with_empty_features_returns_400() {
        let app = app(AppState::in_memory());
        let (_, sms) = send(app.clone(), "POST", "/api/admin/services", Some(service("SMS"))).await;
        let (status, _) = send(
            app,
            "PUT",
            &format!("/api/admin/services/{}", sms["id"]),
            Some(json!({ "features": [""] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_service() {
        let app = app(AppState::in_memory());
        let (_, sms) = send(app.clone(), "POST", "/api/admin/services", Some(service("SMS"))).await;
        let uri = format!("/api/admin/services/{}", sms["id"]);

        let (status, _) = send(app.clone(), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
