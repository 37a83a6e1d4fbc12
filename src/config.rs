//! Layered application configuration.
//!
//! Resolution order (lowest to highest priority):
//! 1. `application.yaml` in the working directory (optional)
//! 2. `.env` file, loaded into the process environment (never overwrites
//!    already-set variables)
//! 3. Environment variables (`APP_SERVER_PORT`/`PORT`,
//!    `APP_DATABASE_URL`/`DATABASE_URL`, `APP_DATABASE_MAX_CONNECTIONS`)

use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// A required key was supplied by no layer.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

/// Shape of `application.yaml`. All keys optional; env vars fill the rest.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    server: FileServer,
    #[serde(default)]
    database: FileDatabase,
}

#[derive(Debug, Default, Deserialize)]
struct FileServer {
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct FileDatabase {
    url: Option<String>,
    max_connections: Option<u32>,
}

impl AppConfig {
    /// Load configuration from `application.yaml`, `.env`, and the process
    /// environment. Call once at startup.
    pub fn load() -> Result<Self, ConfigError> {
        // `.env` never overwrites variables already set in the environment.
        let _ = dotenvy::dotenv();

        let path = Path::new("application.yaml");
        let yaml = if path.exists() {
            Some(std::fs::read_to_string(path).map_err(|e| ConfigError::Load(e.to_string()))?)
        } else {
            None
        };

        Self::resolve(yaml.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolve config from an optional YAML document and an environment
    /// lookup. Split out from [`load`](Self::load) so tests can inject both
    /// layers.
    pub fn resolve(
        yaml: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file: FileConfig = match yaml {
            Some(content) => {
                serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?
            }
            None => FileConfig::default(),
        };

        let port = match env("APP_SERVER_PORT").or_else(|| env("PORT")) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::TypeMismatch {
                key: "server.port".to_string(),
                expected: "u16",
            })?,
            None => file.server.port.unwrap_or(DEFAULT_PORT),
        };

        let url = env("APP_DATABASE_URL")
            .or_else(|| env("DATABASE_URL"))
            .or(file.database.url)
            .ok_or_else(|| ConfigError::NotFound("database.url".to_string()))?;

        let max_connections = match env("APP_DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().map_err(|_| ConfigError::TypeMismatch {
                key: "database.max_connections".to_string(),
                expected: "u32",
            })?,
            None => file
                .database
                .max_connections
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        };

        Ok(AppConfig {
            server: ServerConfig { port },
            database: DatabaseConfig {
                url,
                max_connections,
            },
        })
    }
}
