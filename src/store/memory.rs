//! In-process store used when no database is configured, and by the tests.
//!
//! All tables live behind one `RwLock`, so each trait call is atomic with
//! respect to every other call, matching the single-statement guarantees of
//! the Postgres store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Result, SiteStore, StoreError};
use crate::content::SiteSection;
use crate::db::models::{
    patch_optional_text, AdminUser, CarouselImage, CarouselImagePatch, ContactMessage,
    MoveDirection, NewCarouselImage, NewContactMessage, NewNewsArticle, NewService, NewsArticle,
    NewsArticlePatch, Service, ServicePatch, SiteContent,
};

/// Rows of one table plus its serial counter.
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug, Default)]
struct Tables {
    content: Table<SiteContent>,
    messages: Table<ContactMessage>,
    news: Table<NewsArticle>,
    services: Table<Service>,
    carousel: Table<CarouselImage>,
    admins: Table<AdminUser>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_news(news: &mut [NewsArticle]) {
    news.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(b.id.cmp(&a.id)));
}

fn sort_carousel(images: &mut [CarouselImage]) {
    images.sort_by(|a, b| a.order.cmp(&b.order).then(a.id.cmp(&b.id)));
}

fn remove_by_id<T>(
    table: &mut Table<T>,
    id: i32,
    entity: &'static str,
    row_id: impl Fn(&T) -> i32,
) -> Result<()> {
    let before = table.rows.len();
    table.rows.retain(|row| row_id(row) != id);
    if table.rows.len() == before {
        return Err(StoreError::not_found(entity, id));
    }
    Ok(())
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        let _tables = self.tables.read().await;
        Ok(())
    }

    async fn get_content(&self, key: &str) -> Result<Option<SiteContent>> {
        let tables = self.tables.read().await;
        Ok(tables.content.rows.iter().find(|c| c.key == key).cloned())
    }

    async fn upsert_content(&self, section: &SiteSection) -> Result<SiteContent> {
        let content = section.content_json()?;
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        if let Some(existing) = tables
            .content
            .rows
            .iter_mut()
            .find(|c| c.key == section.key())
        {
            existing.content = content;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let row = SiteContent {
            id: tables.content.allocate_id(),
            key: section.key().to_string(),
            content,
            updated_at: now,
        };
        tables.content.rows.push(row.clone());
        Ok(row)
    }

    async fn list_content(&self) -> Result<Vec<SiteContent>> {
        let tables = self.tables.read().await;
        let mut rows = tables.content.rows.clone();
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(rows)
    }

    async fn create_message(&self, message: NewContactMessage) -> Result<ContactMessage> {
        let mut tables = self.tables.write().await;
        let row = ContactMessage {
            id: tables.messages.allocate_id(),
            name: message.name,
            email: message.email,
            subject: message.subject,
            message: message.message,
            created_at: Utc::now(),
            is_read: false,
        };
        tables.messages.rows.push(row.clone());
        Ok(row)
    }

    async fn list_messages(&self) -> Result<Vec<ContactMessage>> {
        let tables = self.tables.read().await;
        let mut rows = tables.messages.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn mark_message_read(&self, id: i32) -> Result<ContactMessage> {
        let mut tables = self.tables.write().await;
        let message = tables
            .messages
            .rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found("contact_message", id))?;
        message.is_read = true;
        Ok(message.clone())
    }

    async fn delete_message(&self, id: i32) -> Result<()> {
        let mut tables = self.tables.write().await;
        remove_by_id(&mut tables.messages, id, "contact_message", |m| m.id)
    }

    async fn list_news(&self) -> Result<Vec<NewsArticle>> {
        let tables = self.tables.read().await;
        let mut rows = tables.news.rows.clone();
        sort_news(&mut rows);
        Ok(rows)
    }

    async fn list_published_news(&self) -> Result<Vec<NewsArticle>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<NewsArticle> = tables
            .news
            .rows
            .iter()
            .filter(|n| n.is_published)
            .cloned()
            .collect();
        sort_news(&mut rows);
        Ok(rows)
    }

    async fn count_news(&self) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables.news.rows.len() as i64)
    }

    async fn create_news(&self, article: NewNewsArticle) -> Result<NewsArticle> {
        let mut tables = self.tables.write().await;
        let row = NewsArticle {
            id: tables.news.allocate_id(),
            title: article.title,
            excerpt: article.excerpt,
            content: article.content,
            image_url: article.image_url,
            published_at: Utc::now(),
            is_published: article.is_published,
        };
        tables.news.rows.push(row.clone());
        Ok(row)
    }

    async fn update_news(&self, id: i32, patch: NewsArticlePatch) -> Result<NewsArticle> {
        let mut tables = self.tables.write().await;
        let article = tables
            .news
            .rows
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| StoreError::not_found("news_article", id))?;

        if let Some(title) = patch.title {
            article.title = title;
        }
        if let Some(excerpt) = patch.excerpt {
            article.excerpt = excerpt;
        }
        if let Some(content) = patch.content {
            article.content = content;
        }
        article.image_url = patch_optional_text(article.image_url.take(), patch.image_url);
        if let Some(is_published) = patch.is_published {
            article.is_published = is_published;
        }
        Ok(article.clone())
    }

    async fn delete_news(&self, id: i32) -> Result<()> {
        let mut tables = self.tables.write().await;
        remove_by_id(&mut tables.news, id, "news_article", |n| n.id)
    }

    async fn list_services(&self) -> Result<Vec<Service>> {
        let tables = self.tables.read().await;
        Ok(tables.services.rows.clone())
    }

    async fn list_active_services(&self) -> Result<Vec<Service>> {
        let tables = self.tables.read().await;
        Ok(tables
            .services
            .rows
            .iter()
            .filter(|s| s.is_active)
            .cloned()
            .collect())
    }

    async fn count_services(&self) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables.services.rows.len() as i64)
    }

    async fn create_service(&self, service: NewService) -> Result<Service> {
        let mut tables = self.tables.write().await;
        let row = Service {
            id: tables.services.allocate_id(),
            name: service.name,
            description: service.description,
            features: service.features,
            icon: service.icon,
            color: service.color,
            is_active: service.is_active,
        };
        tables.services.rows.push(row.clone());
        Ok(row)
    }

    async fn update_service(&self, id: i32, patch: ServicePatch) -> Result<Service> {
        let mut tables = self.tables.write().await;
        let service = tables
            .services
            .rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("service", id))?;

        if let Some(name) = patch.name {
            service.name = name;
        }
        if let Some(description) = patch.description {
            service.description = description;
        }
        if let Some(features) = patch.features {
            service.features = features;
        }
        if let Some(icon) = patch.icon {
            service.icon = icon;
        }
        if let Some(color) = patch.color {
            service.color = color;
        }
        if let Some(is_active) = patch.is_active {
            service.is_active = is_active;
        }
        Ok(service.clone())
    }

    async fn delete_service(&self, id: i32) -> Result<()> {
        let mut tables = self.tables.write().await;
        remove_by_id(&mut tables.services, id, "service", |s| s.id)
    }

    async fn list_carousel(&self) -> Result<Vec<CarouselImage>> {
        let tables = self.tables.read().await;
        let mut rows = tables.carousel.rows.clone();
        sort_carousel(&mut rows);
        Ok(rows)
    }

    async fn list_active_carousel(&self) -> Result<Vec<CarouselImage>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<CarouselImage> = tables
            .carousel
            .rows
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect();
        sort_carousel(&mut rows);
        Ok(rows)
    }

    async fn create_carousel_image(&self, image: NewCarouselImage) -> Result<CarouselImage> {
        let mut tables = self.tables.write().await;
        let row = CarouselImage {
            id: tables.carousel.allocate_id(),
            image_url: image.image_url,
            title: image.title,
            description: image.description,
            order: image.order,
            is_active: image.is_active,
            created_at: Utc::now(),
        };
        tables.carousel.rows.push(row.clone());
        Ok(row)
    }

    async fn update_carousel_image(
        &self,
        id: i32,
        patch: CarouselImagePatch,
    ) -> Result<CarouselImage> {
        let mut tables = self.tables.write().await;
        let image = tables
            .carousel
            .rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("carousel_image", id))?;

        if let Some(image_url) = patch.image_url {
            image.image_url = image_url;
        }
        image.title = patch_optional_text(image.title.take(), patch.title);
        image.description = patch_optional_text(image.description.take(), patch.description);
        if let Some(order) = patch.order {
            image.order = order;
        }
        if let Some(is_active) = patch.is_active {
            image.is_active = is_active;
        }
        Ok(image.clone())
    }

    async fn move_carousel_image(
        &self,
        id: i32,
        direction: MoveDirection,
    ) -> Result<CarouselImage> {
        let mut tables = self.tables.write().await;
        let image = tables
            .carousel
            .rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("carousel_image", id))?;
        image.order = image.order.saturating_add(direction.delta());
        Ok(image.clone())
    }

    async fn delete_carousel_image(&self, id: i32) -> Result<()> {
        let mut tables = self.tables.write().await;
        remove_by_id(&mut tables.carousel, id, "carousel_image", |c| c.id)
    }

    async fn find_admin(&self, username: &str) -> Result<Option<AdminUser>> {
        let tables = self.tables.read().await;
        Ok(tables
            .admins
            .rows
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn count_admins(&self) -> Result<i64> {
        let tables = self.tables.read().await;
        Ok(tables.admins.rows.len() as i64)
    }

    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<AdminUser> {
        let mut tables = self.tables.write().await;
        if tables.admins.rows.iter().any(|a| a.username == username) {
            return Err(StoreError::Other(format!(
                "admin user '{}' already exists",
                username
            )));
        }
        let row = AdminUser {
            id: tables.admins.allocate_id(),
            username: username.to_string(),
            password: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.admins.rows.push(row.clone());
        Ok(row)
    }
}
