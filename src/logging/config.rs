use serde::{Deserialize, Serialize};

use crate::config::env_non_empty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Where and how much to log. LOG_LEVEL / LOG_DIR.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `None` picks debug in development, info in production.
    pub level: Option<LogLevel>,
    pub dir: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            level: env_non_empty("LOG_LEVEL").and_then(|s| s.parse().ok()),
            dir: env_non_empty("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
        }
    }

    pub fn level_for(&self, is_production: bool) -> LogLevel {
        self.level.unwrap_or(if is_production {
            LogLevel::Info
        } else {
            LogLevel::Debug
        })
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: None,
            dir: "logs".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_default_level_depends_on_environment() {
        let config = LogConfig::default();
        assert_eq!(config.level_for(true), LogLevel::Info);
        assert_eq!(config.level_for(false), LogLevel::Debug);

        let pinned = LogConfig {
            level: Some(LogLevel::Error),
            ..LogConfig::default()
        };
        assert_eq!(pinned.level_for(false).to_string(), "error");
    }
}
