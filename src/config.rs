//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;

/// Which storage backend to connect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// In-process store; contents are lost on restart.
    Memory,
    /// Cloud Firestore in the given GCP project.
    Firestore { project_id: String },
}

impl FromStr for DatabaseConfig {
    type Err = ConfigError;

    /// Parse a connection string: `memory://` or `firestore://<project-id>`.
    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let url = url.trim();
        if url == "memory" || url == "memory://" {
            return Ok(Self::Memory);
        }

        match url.strip_prefix("firestore://") {
            Some(project_id) if !project_id.is_empty() && !project_id.contains('/') => {
                Ok(Self::Firestore {
                    project_id: project_id.to_string(),
                })
            }
            Some(_) => Err(ConfigError::Invalid {
                var: "DATABASE_URL",
                reason: "firestore:// requires a project id".to_string(),
            }),
            None => Err(ConfigError::Invalid {
                var: "DATABASE_URL",
                reason: format!("unsupported scheme in '{}'", url),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend (from `DATABASE_URL`)
    pub database: DatabaseConfig,
    /// Server port
    pub port: u16,
    /// Directory containing `views/index.html` and `public/`
    pub site_dir: PathBuf,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            database: DatabaseConfig::Memory,
            port: DEFAULT_PORT,
            site_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let database = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::Missing("DATABASE_URL"))?
            .parse()?;

        Ok(Self {
            database,
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            site_dir: env::var("SITE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
