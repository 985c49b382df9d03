//! Postgres-backed store. Every operation is a single SQL statement, so
//! writes are atomic without explicit transactions.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Result, SiteStore, StoreError};
use crate::content::SiteSection;
use crate::db::models::{
    AdminUser, CarouselImage, CarouselImagePatch, ContactMessage, MoveDirection, NewCarouselImage,
    NewContactMessage, NewNewsArticle, NewService, NewsArticle, NewsArticlePatch, Service,
    ServicePatch, SiteContent,
};

const CONTENT_COLUMNS: &str = "id, key, content, updated_at";
const MESSAGE_COLUMNS: &str = "id, name, email, subject, message, created_at, is_read";
const NEWS_COLUMNS: &str = "id, title, excerpt, content, image_url, published_at, is_published";
const SERVICE_COLUMNS: &str = "id, name, description, features, icon, color, is_active";
const CAROUSEL_COLUMNS: &str =
    "id, image_url, title, description, display_order, is_active, created_at";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn delete_by_id(&self, table: &str, entity: &'static str, id: i32) -> Result<()> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(entity, id));
        }
        Ok(())
    }

    async fn count(&self, table: &str) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl SiteStore for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn get_content(&self, key: &str) -> Result<Option<SiteContent>> {
        let row = sqlx::query_as::<_, SiteContent>(&format!(
            "SELECT {} FROM site_content WHERE key = $1",
            CONTENT_COLUMNS
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn upsert_content(&self, section: &SiteSection) -> Result<SiteContent> {
        let content = section.content_json()?;
        let row = sqlx::query_as::<_, SiteContent>(&format!(
            r#"
            INSERT INTO site_content (key, content, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (key) DO UPDATE SET
                content = EXCLUDED.content,
                updated_at = now()
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        ))
        .bind(section.key())
        .bind(&content)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_content(&self) -> Result<Vec<SiteContent>> {
        let rows = sqlx::query_as::<_, SiteContent>(&format!(
            "SELECT {} FROM site_content ORDER BY key",
            CONTENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_message(&self, message: NewContactMessage) -> Result<ContactMessage> {
        let row = sqlx::query_as::<_, ContactMessage>(&format!(
            r#"
            INSERT INTO contact_messages (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_messages(&self) -> Result<Vec<ContactMessage>> {
        let rows = sqlx::query_as::<_, ContactMessage>(&format!(
            "SELECT {} FROM contact_messages ORDER BY created_at DESC, id DESC",
            MESSAGE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn mark_message_read(&self, id: i32) -> Result<ContactMessage> {
        sqlx::query_as::<_, ContactMessage>(&format!(
            "UPDATE contact_messages SET is_read = true WHERE id = $1 RETURNING {}",
            MESSAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found("contact_message", id))
    }

    async fn delete_message(&self, id: i32) -> Result<()> {
        self.delete_by_id("contact_messages", "contact_message", id)
            .await
    }

    async fn list_news(&self) -> Result<Vec<NewsArticle>> {
        let rows = sqlx::query_as::<_, NewsArticle>(&format!(
            "SELECT {} FROM news_articles ORDER BY published_at DESC, id DESC",
            NEWS_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_published_news(&self) -> Result<Vec<NewsArticle>> {
        let rows = sqlx::query_as::<_, NewsArticle>(&format!(
            r#"
            SELECT {}
            FROM news_articles
            WHERE is_published = true
            ORDER BY published_at DESC, id DESC
            "#,
            NEWS_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_news(&self) -> Result<i64> {
        self.count("news_articles").await
    }

    async fn create_news(&self, article: NewNewsArticle) -> Result<NewsArticle> {
        let row = sqlx::query_as::<_, NewsArticle>(&format!(
            r#"
            INSERT INTO news_articles (title, excerpt, content, image_url, is_published)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            NEWS_COLUMNS
        ))
        .bind(&article.title)
        .bind(&article.excerpt)
        .bind(&article.content)
        .bind(&article.image_url)
        .bind(article.is_published)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_news(&self, id: i32, patch: NewsArticlePatch) -> Result<NewsArticle> {
        sqlx::query_as::<_, NewsArticle>(&format!(
            r#"
            UPDATE news_articles
            SET title = COALESCE($1, title),
                excerpt = COALESCE($2, excerpt),
                content = COALESCE($3, content),
                image_url = CASE
                    WHEN $4::TEXT IS NULL THEN image_url
                    ELSE NULLIF(BTRIM($4::TEXT), '')
                END,
                is_published = COALESCE($5, is_published)
            WHERE id = $6
            RETURNING {}
            "#,
            NEWS_COLUMNS
        ))
        .bind(&patch.title)
        .bind(&patch.excerpt)
        .bind(&patch.content)
        .bind(&patch.image_url)
        .bind(patch.is_published)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found("news_article", id))
    }

    async fn delete_news(&self, id: i32) -> Result<()> {
        self.delete_by_id("news_articles", "news_article", id).await
    }

    async fn list_services(&self) -> Result<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {} FROM services ORDER BY id",
            SERVICE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_active_services(&self) -> Result<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {} FROM services WHERE is_active = true ORDER BY id",
            SERVICE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_services(&self) -> Result<i64> {
        self.count("services").await
    }

    async fn create_service(&self, service: NewService) -> Result<Service> {
        let row = sqlx::query_as::<_, Service>(&format!(
            r#"
            INSERT INTO services (name, description, features, icon, color, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            SERVICE_COLUMNS
        ))
        .bind(&service.name)
        .bind(&service.description)
        .bind(&service.features)
        .bind(service.icon.as_str())
        .bind(service.color.as_str())
        .bind(service.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_service(&self, id: i32, patch: ServicePatch) -> Result<Service> {
        sqlx::query_as::<_, Service>(&format!(
            r#"
            UPDATE services
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                features = COALESCE($3, features),
                icon = COALESCE($4, icon),
                color = COALESCE($5, color),
                is_active = COALESCE($6, is_active)
            WHERE id = $7
            RETURNING {}
            "#,
            SERVICE_COLUMNS
        ))
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(&patch.features)
        .bind(patch.icon.map(|icon| icon.as_str()))
        .bind(patch.color.map(|color| color.as_str()))
        .bind(patch.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found("service", id))
    }

    async fn delete_service(&self, id: i32) -> Result<()> {
        self.delete_by_id("services", "service", id).await
    }

    async fn list_carousel(&self) -> Result<Vec<CarouselImage>> {
        let rows = sqlx::query_as::<_, CarouselImage>(&format!(
            "SELECT {} FROM carousel_images ORDER BY display_order ASC, id ASC",
            CAROUSEL_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_active_carousel(&self) -> Result<Vec<CarouselImage>> {
        let rows = sqlx::query_as::<_, CarouselImage>(&format!(
            r#"
            SELECT {}
            FROM carousel_images
            WHERE is_active = true
            ORDER BY display_order ASC, id ASC
            "#,
            CAROUSEL_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_carousel_image(&self, image: NewCarouselImage) -> Result<CarouselImage> {
        let row = sqlx::query_as::<_, CarouselImage>(&format!(
            r#"
            INSERT INTO carousel_images (image_url, title, description, display_order, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            CAROUSEL_COLUMNS
        ))
        .bind(&image.image_url)
        .bind(&image.title)
        .bind(&image.description)
        .bind(image.order)
        .bind(image.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_carousel_image(
        &self,
        id: i32,
        patch: CarouselImagePatch,
    ) -> Result<CarouselImage> {
        sqlx::query_as::<_, CarouselImage>(&format!(
            r#"
            UPDATE carousel_images
            SET image_url = COALESCE($1, image_url),
                title = CASE
                    WHEN $2::TEXT IS NULL THEN title
                    ELSE NULLIF(BTRIM($2::TEXT), '')
                END,
                description = CASE
                    WHEN $3::TEXT IS NULL THEN description
                    ELSE NULLIF(BTRIM($3::TEXT), '')
                END,
                display_order = COALESCE($4, display_order),
                is_active = COALESCE($5, is_active)
            WHERE id = $6
            RETURNING {}
            "#,
            CAROUSEL_COLUMNS
        ))
        .bind(&patch.image_url)
        .bind(&patch.title)
        .bind(&patch.description)
        .bind(patch.order)
        .bind(patch.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found("carousel_image", id))
    }

    async fn move_carousel_image(
        &self,
        id: i32,
        direction: MoveDirection,
    ) -> Result<CarouselImage> {
        // Relative update: concurrent moves each apply their step. The BIGINT
        // sum saturates at the INTEGER bounds instead of overflowing.
        sqlx::query_as::<_, CarouselImage>(&format!(
            r#"
            UPDATE carousel_images
            SET display_order = LEAST(
                GREATEST(display_order::BIGINT + $1, -2147483648),
                2147483647
            )::INTEGER
            WHERE id = $2
            RETURNING {}
            "#,
            CAROUSEL_COLUMNS
        ))
        .bind(i64::from(direction.delta()))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found("carousel_image", id))
    }

    async fn delete_carousel_image(&self, id: i32) -> Result<()> {
        self.delete_by_id("carousel_images", "carousel_image", id)
            .await
    }

    async fn find_admin(&self, username: &str) -> Result<Option<AdminUser>> {
        let row = sqlx::query_as::<_, AdminUser>(
            "SELECT id, username, password, created_at FROM admin_users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn count_admins(&self) -> Result<i64> {
        self.count("admin_users").await
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<AdminUser> {
        let row = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
