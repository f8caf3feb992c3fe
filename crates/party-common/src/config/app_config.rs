//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub content: ContentConfig,
    pub database: DatabaseConfig,
    pub device: DeviceConfig,
    pub session: SessionConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Headless content store connection
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    pub project_id: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_use_cdn")]
    pub use_cdn: bool,
}

impl ContentConfig {
    /// Base URL of the query endpoint for this project and dataset
    #[must_use]
    pub fn query_endpoint(&self) -> String {
        let host = if self.use_cdn { "apicdn" } else { "api" };
        format!(
            "https://{}.{host}.sanity.io/v{}/data/query/{}",
            self.project_id, self.api_version, self.dataset
        )
    }
}

/// Vote/reaction database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Device-local persisted state
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
}

/// Session behavior knobs
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
    #[serde(default = "default_reconnect_delay_ms")]
    pub listener_reconnect_delay_ms: u64,
    #[serde(default = "default_hero_video_url")]
    pub fallback_hero_video_url: String,
}

impl SessionConfig {
    #[must_use]
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    #[must_use]
    pub fn listener_reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.listener_reconnect_delay_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            operation_timeout_ms: default_operation_timeout_ms(),
            listener_reconnect_delay_ms: default_reconnect_delay_ms(),
            fallback_hero_video_url: default_hero_video_url(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "party-archive".to_string()
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-18".to_string()
}

fn default_use_cdn() -> bool {
    true
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

fn default_state_path() -> PathBuf {
    PathBuf::from("./.party-device.json")
}

fn default_operation_timeout_ms() -> u64 {
    10_000
}

fn default_reconnect_delay_ms() -> u64 {
    1_000
}

fn default_hero_video_url() -> String {
    "https://cdn.coverr.co/videos/coverr-party-crowd-9717/1080p.mp4".to_string()
}

/// Parse an optional variable, falling back to `default` only when it is unset
fn parse_or<T, F>(
    lookup: &F,
    name: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        None => Ok(default()),
    }
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: parse_or(&lookup, "APP_ENV", Environment::default)?,
            },
            content: ContentConfig {
                project_id: required(&lookup, "CONTENT_PROJECT_ID")?,
                dataset: lookup("CONTENT_DATASET").unwrap_or_else(default_dataset),
                api_version: lookup("CONTENT_API_VERSION").unwrap_or_else(default_api_version),
                use_cdn: parse_or(&lookup, "CONTENT_USE_CDN", default_use_cdn)?,
            },
            database: DatabaseConfig {
                url: required(&lookup, "DATABASE_URL")?,
                max_connections: parse_or(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    default_max_connections,
                )?,
                min_connections: parse_or(
                    &lookup,
                    "DATABASE_MIN_CONNECTIONS",
                    default_min_connections,
                )?,
            },
            device: DeviceConfig {
                state_path: lookup("DEVICE_STATE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_state_path),
            },
            session: SessionConfig {
                operation_timeout_ms: parse_or(
                    &lookup,
                    "OPERATION_TIMEOUT_MS",
                    default_operation_timeout_ms,
                )?,
                listener_reconnect_delay_ms: parse_or(
                    &lookup,
                    "LISTENER_RECONNECT_DELAY_MS",
                    default_reconnect_delay_ms,
                )?,
                fallback_hero_video_url: lookup("FALLBACK_HERO_VIDEO_URL")
                    .unwrap_or_else(default_hero_video_url),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
