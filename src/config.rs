//! Application configuration, read once from the environment at startup.

use std::net::SocketAddr;

use crate::db::DbConfig;
use crate::logging::config::LogConfig;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Credentials for the account the seeder creates on first start.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub username: String,
    pub password: AdminPassword,
}

/// Either a plain password (hashed by the seeder) or a ready bcrypt hash.
#[derive(Debug, Clone)]
pub enum AdminPassword {
    Plain(String),
    Hashed(String),
}

impl AdminSeed {
    /// True when the seeded account would fall back to the built-in password.
    pub fn uses_default_password(&self) -> bool {
        matches!(&self.password, AdminPassword::Plain(p) if p == DEFAULT_ADMIN_PASSWORD)
    }
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: AdminPassword::Plain(DEFAULT_ADMIN_PASSWORD.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub allowed_origins: Vec<String>,
    /// `None` when DATABASE_URL is unset; the server then runs on the memory store.
    pub database: Option<DbConfig>,
    pub admin: AdminSeed,
    pub seed_defaults: bool,
    pub log: LogConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let admin_username = env_non_empty("ADMIN_USERNAME")
            .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.to_string());
        // A pre-computed hash (see the hash-password binary) wins over a plain password.
        let admin_password = env_non_empty("ADMIN_PASSWORD_HASH")
            .map(AdminPassword::Hashed)
            .or_else(|| env_non_empty("ADMIN_PASSWORD").map(AdminPassword::Plain))
            .unwrap_or_else(|| AdminPassword::Plain(DEFAULT_ADMIN_PASSWORD.to_string()));

        Self {
            host: env_non_empty("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: env_parse("PORT").unwrap_or(3001),
            environment: env_non_empty("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            allowed_origins: allowed_origins_from_env(),
            database: env_non_empty("DATABASE_URL").map(|_| DbConfig::default()),
            admin: AdminSeed {
                username: admin_username,
                password: admin_password,
            },
            seed_defaults: env_bool("SEED_DEFAULTS").unwrap_or(true),
            log: LogConfig::from_env(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            environment: "development".to_string(),
            allowed_origins: default_origins(),
            database: None,
            admin: AdminSeed::default(),
            seed_defaults: true,
            log: LogConfig::default(),
        }
    }
}

/// ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN, falling back to
/// the local dev frontend.
fn allowed_origins_from_env() -> Vec<String> {
    env_non_empty("ALLOWED_ORIGINS")
        .map(|s| {
            s.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty())
        .or_else(|| env_non_empty("FRONTEND_ORIGIN").map(|origin| vec![origin]))
        .unwrap_or_else(default_origins)
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

pub(crate) fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_binds_localhost() {
        let config = AppConfig::default();
        let addr = config.bind_addr().unwrap();
        assert_eq!(addr.port(), 3001);
        assert!(addr.ip().is_loopback());
        assert!(!config.is_production());
    }

    #[test]
    fn test_default_admin_uses_default_password() {
        let admin = AdminSeed::default();
        assert_eq!(admin.username, "admin");
        assert!(admin.uses_default_password());

        let hashed = AdminSeed {
            username: "admin".to_string(),
            password: AdminPassword::Hashed("$2b$12$abc".to_string()),
        };
        assert!(!hashed.uses_default_password());
    }
}
