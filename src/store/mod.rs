//! Persistence seam for the site.
//!
//! [`SiteStore`] is the only way handlers and the seeder touch data. The
//! server builds one implementation at startup (Postgres when a database is
//! configured, memory otherwise) and shares it through [`crate::state::AppState`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::content::SiteSection;
use crate::db::models::{
    AdminUser, CarouselImage, CarouselImagePatch, ContactMessage, MoveDirection, NewCarouselImage,
    NewContactMessage, NewNewsArticle, NewService, NewsArticle, NewsArticlePatch, Service,
    ServicePatch, SiteContent,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors that can occur within the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required record was not found.
    #[error("Storage: {entity} not found (id={id})")]
    NotFound { entity: &'static str, id: String },

    #[error("Storage: database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON serialization or deserialization failure (content documents).
    #[error("Storage: JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage: {0}")]
    Other(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Cheap liveness probe used by the readiness endpoint.
    async fn ping(&self) -> Result<()>;

    // Site content
    async fn get_content(&self, key: &str) -> Result<Option<SiteContent>>;
    /// Insert-or-replace keyed on the section key, in one atomic step.
    async fn upsert_content(&self, section: &SiteSection) -> Result<SiteContent>;
    async fn list_content(&self) -> Result<Vec<SiteContent>>;

    // Contact messages
    async fn create_message(&self, message: NewContactMessage) -> Result<ContactMessage>;
    /// Newest first.
    async fn list_messages(&self) -> Result<Vec<ContactMessage>>;
    async fn mark_message_read(&self, id: i32) -> Result<ContactMessage>;
    async fn delete_message(&self, id: i32) -> Result<()>;

    // News articles
    async fn list_news(&self) -> Result<Vec<NewsArticle>>;
    async fn list_published_news(&self) -> Result<Vec<NewsArticle>>;
    async fn count_news(&self) -> Result<i64>;
    async fn create_news(&self, article: NewNewsArticle) -> Result<NewsArticle>;
    async fn update_news(&self, id: i32, patch: NewsArticlePatch) -> Result<NewsArticle>;
    async fn delete_news(&self, id: i32) -> Result<()>;

    // Services
    async fn list_services(&self) -> Result<Vec<Service>>;
    async fn list_active_services(&self) -> Result<Vec<Service>>;
    async fn count_services(&self) -> Result<i64>;
    async fn create_service(&self, service: NewService) -> Result<Service>;
    async fn update_service(&self, id: i32, patch: ServicePatch) -> Result<Service>;
    async fn delete_service(&self, id: i32) -> Result<()>;

    // Carousel images; both lists sort by `order`, ties by id.
    async fn list_carousel(&self) -> Result<Vec<CarouselImage>>;
    async fn list_active_carousel(&self) -> Result<Vec<CarouselImage>>;
    async fn create_carousel_image(&self, image: NewCarouselImage) -> Result<CarouselImage>;
    async fn update_carousel_image(
        &self,
        id: i32,
        patch: CarouselImagePatch,
    ) -> Result<CarouselImage>;
    /// Shift `order` by one step relative to its current value, clamped to
    /// the `i32` range.
    async fn move_carousel_image(&self, id: i32, direction: MoveDirection)
        -> Result<CarouselImage>;
    async fn delete_carousel_image(&self, id: i32) -> Result<()>;

    // Admin users
    async fn find_admin(&self, username: &str) -> Result<Option<AdminUser>>;
    async fn count_admins(&self) -> Result<i64>;
    /// `password_hash` must already be a bcrypt hash.
    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<AdminUser>;
}
