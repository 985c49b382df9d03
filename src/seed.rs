//! Default content for a fresh install.
//!
//! Runs on every startup. Each step only writes when its key or table is
//! still empty, so repeated runs never duplicate rows. Steps are independent:
//! a failing step is logged and the rest still run.

use crate::config::{AdminPassword, AdminSeed};
use crate::content::default_sections;
use crate::db::models::{NewNewsArticle, NewService, ServiceColor, ServiceIcon};
use crate::store::{self, SiteStore, StoreError};

struct ServiceDef {
    name: &'static str,
    description: &'static str,
    features: &'static [&'static str],
    icon: ServiceIcon,
    color: ServiceColor,
}

const DEFAULT_SERVICES: &[ServiceDef] = &[
    ServiceDef {
        name: "SMS Service",
        description: "Reliable and fast SMS delivery with global reach and advanced features",
        features: &["Global SMS delivery", "99.9% delivery rate", "API integration"],
        icon: ServiceIcon::MessageSquare,
        color: ServiceColor::Emerald,
    },
    ServiceDef {
        name: "Voice Service",
        description: "Crystal-clear voice calls with advanced routing and quality optimization",
        features: &["HD voice quality", "Smart routing", "Call analytics"],
        icon: ServiceIcon::Phone,
        color: ServiceColor::Amber,
    },
    ServiceDef {
        name: "Data Service",
        description: "High-speed data connectivity with secure transmission and monitoring",
        features: &["High-speed connectivity", "Secure transmission", "Real-time monitoring"],
        icon: ServiceIcon::Database,
        color: ServiceColor::Blue,
    },
];

struct NewsDef {
    title: &'static str,
    excerpt: &'static str,
    content: &'static str,
    image_url: &'static str,
}

const DEFAULT_NEWS: &[NewsDef] = &[
    NewsDef {
        title: "VoipFit Expands 5G Network Coverage",
        excerpt: "Enhanced connectivity reaching 20 new countries with ultra-fast 5G infrastructure.",
        content: "VoipFit continues to expand its global 5G network coverage, bringing ultra-fast \
                  connectivity to 20 new countries. This expansion represents our commitment to \
                  providing cutting-edge telecommunications infrastructure worldwide.",
        image_url: "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400",
    },
    NewsDef {
        title: "Industry Excellence Award 2024",
        excerpt: "VoipFit recognized for outstanding innovation in telecommunications services.",
        content: "We are proud to announce that VoipFit has been awarded the Industry Excellence \
                  Award 2024 for our innovative telecommunications solutions and exceptional \
                  customer service.",
        image_url: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400",
    },
    NewsDef {
        title: "Strategic Partnership Announcement",
        excerpt: "New alliance strengthening our global telecommunications network.",
        content: "VoipFit announces a strategic partnership that will significantly strengthen our \
                  global telecommunications network and enhance service delivery to our customers \
                  worldwide.",
        image_url: "https://images.unsplash.com/photo-1600880292203-757bb62b4baf?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&h=400",
    },
];

/// What one seeding pass inserted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub content_keys: Vec<&'static str>,
    pub services: usize,
    pub news: usize,
    pub admin_created: bool,
    pub failed_steps: Vec<&'static str>,
}

/// Seed content sections, services, news, and the admin account.
pub async fn initialize_defaults(store: &dyn SiteStore, admin: &AdminSeed) -> SeedReport {
    let mut report = SeedReport::default();

    match seed_content(store).await {
        Ok(keys) => report.content_keys = keys,
        Err(e) => {
            tracing::error!(step = "content", error = %e, "Failed to seed site content");
            report.failed_steps.push("content");
        }
    }

    match seed_services(store).await {
        Ok(count) => report.services = count,
        Err(e) => {
            tracing::error!(step = "services", error = %e, "Failed to seed services");
            report.failed_steps.push("services");
        }
    }

    match seed_news(store).await {
        Ok(count) => report.news = count,
        Err(e) => {
            tracing::error!(step = "news", error = %e, "Failed to seed news articles");
            report.failed_steps.push("news");
        }
    }

    match seed_admin(store, admin).await {
        Ok(created) => report.admin_created = created,
        Err(e) => {
            tracing::error!(step = "admin", error = %e, "Failed to seed admin user");
            report.failed_steps.push("admin");
        }
    }

    tracing::info!(
        content_keys = ?report.content_keys,
        services = report.services,
        news = report.news,
        admin_created = report.admin_created,
        failed = ?report.failed_steps,
        "Default content initialization finished"
    );

    report
}

async fn seed_content(store: &dyn SiteStore) -> store::Result<Vec<&'static str>> {
    let mut inserted = Vec::new();
    for section in default_sections() {
        if store.get_content(section.key()).await?.is_some() {
            continue;
        }
        store.upsert_content(&section).await?;
        inserted.push(section.key());
    }
    Ok(inserted)
}

async fn seed_services(store: &dyn SiteStore) -> store::Result<usize> {
    let existing = store.count_services().await?;
    if existing > 0 {
        tracing::debug!(existing, "Services already exist, skipping seed");
        return Ok(0);
    }

    for def in DEFAULT_SERVICES {
        store
            .create_service(NewService {
                name: def.name.to_string(),
                description: def.description.to_string(),
                features: def.features.iter().map(|f| f.to_string()).collect(),
                icon: def.icon,
                color: def.color,
                is_active: true,
            })
            .await?;
    }
    Ok(DEFAULT_SERVICES.len())
}

async fn seed_news(store: &dyn SiteStore) -> store::Result<usize> {
    let existing = store.count_news().await?;
    if existing > 0 {
        tracing::debug!(existing, "News articles already exist, skipping seed");
        return Ok(0);
    }

    for def in DEFAULT_NEWS {
        store
            .create_news(NewNewsArticle {
                title: def.title.to_string(),
                excerpt: def.excerpt.to_string(),
                content: def.content.to_string(),
                image_url: Some(def.image_url.to_string()),
                is_published: true,
            })
            .await?;
    }
    Ok(DEFAULT_NEWS.len())
}

async fn seed_admin(store: &dyn SiteStore, admin: &AdminSeed) -> store::Result<bool> {
    if store.find_admin(&admin.username).await?.is_some() {
        return Ok(false);
    }
    // One administrator account; a renamed ADMIN_USERNAME does not add another.
    let existing = store.count_admins().await?;
    if existing > 0 {
        tracing::warn!(
            username = %admin.username,
            existing,
            "An admin account already exists under another username, skipping admin seed"
        );
        return Ok(false);
    }

    let password_hash = match &admin.password {
        AdminPassword::Hashed(hash) => hash.clone(),
        AdminPassword::Plain(plain) => {
            // bcrypt is CPU-bound; keep the async executor free.
            let plain = plain.clone();
            tokio::task::spawn_blocking(move || bcrypt::hash(plain, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| StoreError::Other(format!("password hashing task failed: {}", e)))?
                .map_err(|e| StoreError::Other(format!("failed to hash admin password: {}", e)))?
        }
    };

    store.create_admin(&admin.username, &password_hash).await?;
    tracing::info!(username = %admin.username, "Created default admin user");
    Ok(true)
}
