//! Database Models - rows of the site tables and the payloads that write them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Site content row. `content` holds the serialized [`crate::content::SiteSection`] body.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub id: i32,
    pub key: String,
    pub content: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

/// Contact message model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

/// New contact message (validated)
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// News article model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: i32,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub is_published: bool,
}

#[derive(Debug, Clone)]
pub struct NewNewsArticle {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub image_url: Option<String>,
    pub is_published: bool,
}

/// Partial news update. `image_url: Some("")` clears the image.
#[derive(Debug, Clone, Default)]
pub struct NewsArticlePatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

/// Icons the public services section knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceIcon {
    MessageSquare,
    Phone,
    Database,
}

impl ServiceIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceIcon::MessageSquare => "MessageSquare",
            ServiceIcon::Phone => "Phone",
            ServiceIcon::Database => "Database",
        }
    }
}

/// A stored or submitted value outside a closed set of variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl TryFrom<String> for ServiceIcon {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "MessageSquare" => Ok(ServiceIcon::MessageSquare),
            "Phone" => Ok(ServiceIcon::Phone),
            "Database" => Ok(ServiceIcon::Database),
            _ => Err(UnknownVariant {
                kind: "service icon",
                value,
            }),
        }
    }
}

/// Accent colors offered by the admin form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceColor {
    Emerald,
    Amber,
    Blue,
}

impl ServiceColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceColor::Emerald => "emerald",
            ServiceColor::Amber => "amber",
            ServiceColor::Blue => "blue",
        }
    }
}

impl TryFrom<String> for ServiceColor {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "emerald" => Ok(ServiceColor::Emerald),
            "amber" => Ok(ServiceColor::Amber),
            "blue" => Ok(ServiceColor::Blue),
            _ => Err(UnknownVariant {
                kind: "service color",
                value,
            }),
        }
    }
}

/// Service model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    #[sqlx(try_from = "String")]
    pub icon: ServiceIcon,
    #[sqlx(try_from = "String")]
    pub color: ServiceColor,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    pub icon: ServiceIcon,
    pub color: ServiceColor,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub icon: Option<ServiceIcon>,
    pub color: Option<ServiceColor>,
    pub is_active: Option<bool>,
}

/// Carousel image model. Stored as `display_order`; `order` is reserved in SQL.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselImage {
    pub id: i32,
    pub image_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[sqlx(rename = "display_order")]
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCarouselImage {
    pub image_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

/// Partial carousel update. Empty `title`/`description` clear the field.
#[derive(Debug, Clone, Default)]
pub struct CarouselImagePatch {
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Direction of a one-step carousel move; `Up` shows the image earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn delta(&self) -> i32 {
        match self {
            MoveDirection::Up => -1,
            MoveDirection::Down => 1,
        }
    }
}

/// Admin user model. `password` is a bcrypt hash and never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Resolve an optional-text patch: absent keeps `current`, blank clears it.
pub fn patch_optional_text(current: Option<String>, patch: Option<String>) -> Option<String> {
    match patch {
        None => current,
        Some(value) if value.trim().is_empty() => None,
        Some(value) => Some(value),
    }
}
