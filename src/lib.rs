//! Site CMS Backend - library for app logic and testing

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod logging;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore, SiteStore};

/// Request bodies above this are rejected with 413.
const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// CORS for the configured frontend origins. Unparseable origins and `*`
/// are skipped.
pub fn configure_cors(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            // A wildcard cannot be combined with credentialed requests.
            if origin.trim() == "*" {
                tracing::warn!("Ignoring wildcard CORS origin; list origins explicitly");
                return None;
            }
            match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = configure_cors(allowed_origins);

    Router::new()
        // Public
        .route("/api/content/{key}", get(routes::content::get_content))
        .route("/api/services", get(routes::services::list_active))
        .route("/api/news", get(routes::news::list_published))
        .route("/api/carousel", get(routes::carousel::list_active))
        .route("/api/contact", post(routes::messages::create_message))
        // Admin
        .route("/api/admin/login", post(routes::auth::login))
        .route(
            "/api/admin/content",
            get(routes::content::list_content).put(routes::content::update_content),
        )
        .route("/api/admin/messages", get(routes::messages::list_messages))
        .route(
            "/api/admin/messages/{id}",
            axum::routing::delete(routes::messages::delete_message),
        )
        .route(
            "/api/admin/messages/{id}/read",
            put(routes::messages::mark_read),
        )
        .route(
            "/api/admin/news",
            get(routes::news::list_all).post(routes::news::create_article),
        )
        .route(
            "/api/admin/news/{id}",
            put(routes::news::update_article).delete(routes::news::delete_article),
        )
        .route(
            "/api/admin/services",
            get(routes::services::list_all).post(routes::services::create_service),
        )
        .route(
            "/api/admin/services/{id}",
            put(routes::services::update_service).delete(routes::services::delete_service),
        )
        .route(
            "/api/admin/carousel",
            get(routes::carousel::list_all).post(routes::carousel::create_image),
        )
        .route(
            "/api/admin/carousel/{id}",
            put(routes::carousel::update_image).delete(routes::carousel::delete_image),
        )
        .route(
            "/api/admin/carousel/{id}/move",
            post(routes::carousel::move_image),
        )
        .route("/health", get(routes::health::health_ping))
        .route("/health/ready", get(routes::health::health_ready))
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Postgres when DATABASE_URL is set and reachable, otherwise the memory store.
async fn open_store(config: &AppConfig) -> Arc<dyn SiteStore> {
    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Content is kept in memory and lost on restart.");
        return Arc::new(MemoryStore::new());
    };

    let pool = match db::init_pool(db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Failed to initialize database pool. Falling back to the in-memory store."
            );
            return Arc::new(MemoryStore::new());
        }
    };

    if let Err(e) = db::run_migrations(&pool).await {
        tracing::error!(error = %e, "Failed to run database migrations");
    }

    Arc::new(PgStore::new(pool))
}

/// Run the server (used by main).
pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    // Guards MUST be held for the programme's lifetime; dropping them early
    // shuts down background log-writer threads and loses buffered log lines.
    let _log_guards = logging::init(&config.environment, &config.log);

    if config.is_production() && config.admin.uses_default_password() {
        tracing::warn!(
            "SECURITY: Neither ADMIN_PASSWORD_HASH nor ADMIN_PASSWORD is set. \
             The fallback default password is insecure. \
             Set ADMIN_PASSWORD_HASH to a bcrypt hash of a strong password."
        );
    }

    let store = open_store(&config).await;

    if config.seed_defaults {
        let report = seed::initialize_defaults(store.as_ref(), &config.admin).await;
        if !report.failed_steps.is_empty() {
            tracing::warn!(failed = ?report.failed_steps, "Some default content was not seeded");
        }
    } else {
        tracing::info!("SEED_DEFAULTS disabled. Skipping default content.");
    }

    let addr = config
        .bind_addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let app = create_app(AppState::new(store), &config.allowed_origins);
    tracing::info!(origins = ?config.allowed_origins, "CORS configured");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server on {}", addr);

    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{get_json, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_wildcard_origin_is_skipped() {
        let app = create_app(
            AppState::in_memory(),
            &["*".to_string(), "http://localhost:5173".to_string()],
        );
        let req = axum::http::Request::get("/health")
            .header("origin", "http://localhost:5173")
            .body(axum::body::Body::empty())
            .unwrap();
        let res = tower::ServiceExt::oneshot(app, req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()["access-control-allow-origin"],
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let app = create_app(AppState::in_memory(), &[]);
        let (status, _) = get_json(app, "/api/nothing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_seeded_store_serves_defaults_and_login() {
        let state = AppState::in_memory();
        let admin = config::AdminSeed {
            username: "admin".to_string(),
            password: config::AdminPassword::Hashed(bcrypt::hash("admin123", 4).unwrap()),
        };
        let report = seed::initialize_defaults(state.store.as_ref(), &admin).await;
        assert!(report.failed_steps.is_empty());

        let app = create_app(state, &["http://localhost:5173".to_string()]);

        let (status, hero) = get_json(app.clone(), "/api/content/hero").await;
        assert_eq!(status, StatusCode::OK);
        assert!(hero["content"]["title"].is_string());

        let (_, services) = get_json(app.clone(), "/api/services").await;
        assert_eq!(services.as_array().unwrap().len(), 3);

        let (status, body) = send(
            app,
            "POST",
            "/api/admin/login",
            Some(json!({ "username": "admin", "password": "admin123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let app = create_app(AppState::in_memory(), &[]);
        let huge = "x".repeat(BODY_LIMIT_BYTES + 1);
        let (status, _) = send(
            app,
            "POST",
            "/api/contact",
            Some(json!({ "name": "a", "email": "a@b.co", "subject": "s", "message": huge })),
        )
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
