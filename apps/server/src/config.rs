//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Development default values.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 5000;
    pub const DEV_UPLOAD_ROOT: &str = "uploads";
    pub const DEV_STATIC_DIR: &str = "static";
    pub const DEV_MAX_UPLOAD_SIZE: usize = 524_288_000; // 500MB per file
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Environment named by `RUST_ENV`, development when unset.
    pub fn from_var(value: Option<&str>) -> Result<Self, ConfigError> {
        match value {
            None => Ok(Self::Development),
            Some(s) => Self::parse(s).ok_or(ConfigError::InvalidValue(
                "RUST_ENV must be 'development' or 'production'",
            )),
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Root directory holding the category directories
    pub upload_root: PathBuf,
    /// Directory for static assets served under /static
    pub static_dir: PathBuf,
    /// Maximum size of a single uploaded file in bytes (default: 500MB)
    pub max_upload_size: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production, default: development)
    /// - `PORTAL_HOST`: Server host (default: 127.0.0.1)
    /// - `PORTAL_PORT`: Server port (default: 5000)
    /// - `PORTAL_UPLOAD_ROOT`: Upload root directory (default: uploads, required in production)
    /// - `PORTAL_STATIC_DIR`: Static assets directory (default: static)
    /// - `PORTAL_MAX_UPLOAD_SIZE`: Max upload size in bytes (default: 500MB)
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_var(env::var("RUST_ENV").ok().as_deref())?;

        let host = env::var("PORTAL_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("PORTAL_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("PORTAL_PORT must be a valid port number"))?;

        let upload_root = env::var("PORTAL_UPLOAD_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(defaults::DEV_UPLOAD_ROOT));

        let static_dir = env::var("PORTAL_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(defaults::DEV_STATIC_DIR));

        let max_upload_size = env::var("PORTAL_MAX_UPLOAD_SIZE")
            .unwrap_or_else(|_| defaults::DEV_MAX_UPLOAD_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORTAL_MAX_UPLOAD_SIZE must be a valid number")
            })?;

        if max_upload_size == 0 {
            return Err(ConfigError::InvalidValue(
                "PORTAL_MAX_UPLOAD_SIZE must be greater than zero",
            ));
        }

        let config = Config {
            environment,
            host,
            port,
            upload_root,
            static_dir,
            max_upload_size,
        };

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration does not rely on development defaults.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.upload_root == PathBuf::from(defaults::DEV_UPLOAD_ROOT) {
            errors.push(format!(
                "PORTAL_UPLOAD_ROOT is using development default '{}'. Set an explicit storage path.",
                defaults::DEV_UPLOAD_ROOT
            ));
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
