use crate::error::{AppError, AppResult};
use chatadmin_client::config::GatewaySettings;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Prefix of environment variables overriding file values, e.g.
/// `CHATADMIN_GATEWAY__REQUEST_TIMEOUT_SECS=30`.
pub const ENV_PREFIX: &str = "CHATADMIN";

pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 200;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Main application configuration
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    page_size: Option<u32>,
    #[serde(default)]
    gateway: GatewaySettings,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let page_size = self.page_size();
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&page_size) {
            errors.push(ConfigValidationError::PageSize {
                configured: page_size,
                min_limit: MIN_PAGE_SIZE,
                max_limit: MAX_PAGE_SIZE,
            });
        }

        if let Some(timeout) = self.gateway.request_timeout() {
            if timeout.as_secs() > MAX_REQUEST_TIMEOUT_SECS {
                errors.push(ConfigValidationError::RequestTimeout {
                    configured: timeout.as_secs(),
                    limit: MAX_REQUEST_TIMEOUT_SECS,
                });
            }
        }

        if !LoggingConfig::LEVELS.contains(&self.logging.level().to_lowercase().as_str()) {
            errors.push(ConfigValidationError::LogLevel {
                configured: self.logging.level().to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(10)
    }

    pub fn gateway(&self) -> &GatewaySettings {
        &self.gateway
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

/// Additional logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub const LEVELS: [&'static str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("warn")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("Invalid page_size: {configured} (min: {min_limit}, max: {max_limit})")]
    PageSize {
        configured: u32,
        min_limit: u32,
        max_limit: u32,
    },
    #[error("Invalid gateway.request_timeout_secs: {configured} (limit: {limit})")]
    RequestTimeout { configured: u64, limit: u64 },
    #[error("Invalid logging.level: {configured}")]
    LogLevel { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::PageSize {
                configured,
                min_limit,
                max_limit,
            } => format!(
                "Page size out of range: {configured}. \
                 Please set page_size to a value between {min_limit} and {max_limit}."
            ),
            ConfigValidationError::RequestTimeout { configured, limit } => format!(
                "Request timeout too high: {configured} seconds. \
                 Please set gateway.request_timeout_secs to {limit} or less."
            ),
            ConfigValidationError::LogLevel { configured } => format!(
                "Unknown log level '{configured}'. Use one of: {}.",
                LoggingConfig::LEVELS.join(", ")
            ),
        }
    }
}

/// Default location of the configuration file.
///
/// Prefers `~/.config/chatadmin/config.toml` on Unix-like systems.
pub fn default_config_path() -> Option<PathBuf> {
    let dir = if cfg!(unix) {
        dirs::home_dir().map(|home| home.join(".config"))
    } else {
        None
    };

    dir.or_else(dirs::config_dir)
        .map(|dir| dir.join("chatadmin").join("config.toml"))
}

/// Loads the configuration from `path` (optional file) and the environment.
///
/// A missing file is fine: every setting has a default. Values from the
/// environment override the file.
pub fn load_config(path: Option<&Path>) -> AppResult<AppConfig> {
    dotenv::dotenv().ok();

    let mut builder = Config::builder();
    if let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) {
        log::debug!("Reading configuration from {}", path.display());
        builder = builder.add_source(File::from(path).required(false));
    }

    let env_source = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true);

    let config = builder.add_source(env_source).build().map_err(|e| {
        AppError::Config(format!(
            "Configuration loading failed: {e}. Please check your config.toml file and environment variables."
        ))
    })?;

    let app_config = config
        .try_deserialize::<AppConfig>()
        .map_err(|e| AppError::Config(format!("Failed to deserialize config: {e}")))?;

    if let Err(validation_errors) = app_config.validate() {
        let messages: Vec<String> = validation_errors
            .iter()
            .map(ConfigValidationError::user_message)
            .collect();
        return Err(AppError::Config(format!(
            "Configuration validation failed:\n{}",
            messages.join("\n")
        )));
    }

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size(), 10);
        assert_eq!(config.logging().level(), "warn");
    }

    #[test]
    fn loads_gateway_table_from_file() {
        let file = write_config(
            r#"
page_size = 25

[gateway]
request_timeout_secs = 20

[gateway.storage_keys]
session = "session"

[logging]
level = "debug"
"#,
        );

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.page_size(), 25);
        assert_eq!(config.gateway().storage_keys().session(), "session");
        assert_eq!(config.gateway().storage_keys().connection(), "conn");
        assert_eq!(
            config.gateway().request_timeout().map(|t| t.as_secs()),
            Some(20)
        );
        assert_eq!(config.logging().level(), "debug");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.page_size(), 10);
    }

    #[test]
    fn out_of_range_values_are_reported_together() {
        let file = write_config(
            r#"
page_size = 0

[gateway]
request_timeout_secs = 900
"#,
        );

        let err = load_config(Some(file.path())).unwrap_err();
        let AppError::Config(message) = err else {
            panic!("expected a configuration error");
        };
        assert!(message.contains("Page size out of range"));
        assert!(message.contains("Request timeout too high"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let config: AppConfig =
            serde_json::from_str(r#"{"logging": {"level": "verbose"}}"#).unwrap();
        assert_eq!(
            config.validate().unwrap_err(),
            vec![ConfigValidationError::LogLevel {
                configured: "verbose".to_string()
            }]
        );
    }
}
