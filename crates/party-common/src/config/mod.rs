//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, ContentConfig, DatabaseConfig, DeviceConfig, Environment,
    SessionConfig,
};
