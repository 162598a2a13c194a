//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PANTRY_HOST` - Bind address (default: 127.0.0.1)
//! - `PANTRY_PORT` - Listen port (default: 3000)
//! - `PANTRY_SNAPSHOT_PATH` - Catalog snapshot file (default: data/catalog.json)
//! - `PANTRY_SNAPSHOT_INTERVAL_SECS` - Snapshot cadence (default: 60)
//! - `TELEGRAM_BOT_TOKEN` - Bot token for order notifications
//! - `TELEGRAM_CHAT_ID` - Chat the notifications are delivered to
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! The Telegram variables come as a pair: setting one without the other is a
//! configuration error, setting neither disables the notifier.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Pantry server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Catalog snapshot sink configuration
    pub snapshot: SnapshotConfig,
    /// Telegram notifier configuration; `None` disables outbound notifications
    pub telegram: Option<TelegramConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Periodic catalog snapshot configuration.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// File the catalog is persisted to
    pub path: PathBuf,
    /// How often the snapshot task runs
    pub interval: Duration,
}

/// Telegram Bot API configuration.
///
/// Implements `Debug` manually to redact the bot token.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token (server-side only)
    pub bot_token: SecretString,
    /// Chat notifications are sent to
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse or the Telegram
    /// pair is only half-configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("PANTRY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PANTRY_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("PANTRY_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PANTRY_PORT".to_owned(), e.to_string()))?;

        let snapshot = SnapshotConfig::from_env()?;
        let telegram = TelegramConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            snapshot,
            telegram,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SnapshotConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let path = PathBuf::from(get_env_or_default("PANTRY_SNAPSHOT_PATH", "data/catalog.json"));
        let interval_secs = get_env_or_default("PANTRY_SNAPSHOT_INTERVAL_SECS", "60")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PANTRY_SNAPSHOT_INTERVAL_SECS".to_owned(), e.to_string())
            })?;
        if interval_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "PANTRY_SNAPSHOT_INTERVAL_SECS".to_owned(),
                "must be at least 1 second".to_owned(),
            ));
        }
        Ok(Self {
            path,
            interval: Duration::from_secs(interval_secs),
        })
    }
}

impl TelegramConfig {
    /// Both variables present: notifier on. Neither: notifier off.
    /// Exactly one: a configuration error worth failing loudly on.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let token = get_optional_env("TELEGRAM_BOT_TOKEN");
        let chat_id = get_optional_env("TELEGRAM_CHAT_ID");
        match (token, chat_id) {
            (Some(token), Some(chat_id)) => Ok(Some(Self {
                bot_token: SecretString::from(token),
                chat_id,
            })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingEnvVar("TELEGRAM_CHAT_ID".to_owned())),
            (None, Some(_)) => Err(ConfigError::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_owned())),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            snapshot: SnapshotConfig {
                path: PathBuf::from("data/catalog.json"),
                interval: Duration::from_secs(60),
            },
            telegram: Some(TelegramConfig {
                bot_token: SecretString::from("123456:bot-token-value"),
                chat_id: "-100200300".to_owned(),
            }),
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_telegram_config_debug_redacts_token() {
        let config = test_config();
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("-100200300"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("bot-token-value"));
    }
}
