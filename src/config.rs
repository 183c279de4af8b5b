use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Looked up in the working directory when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "reelfeed";

/// Environment variable prefix; sections are separated by `__`
pub const ENV_PREFIX: &str = "REELFEED";

pub const DEFAULT_BASE_URL: &str = "https://movies-tv-shows-database.p.rapidapi.com/";
pub const DEFAULT_API_HOST: &str = "movies-tv-shows-database.p.rapidapi.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub images: ImageConfig,
    pub detail: DetailConfig,
}

impl AppConfig {
    /// Defaults, then `reelfeed.toml` if present, then `REELFEED__*` variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`AppConfig::load`], but an explicit file must exist
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = match path {
            Some(path) => Config::builder().add_source(File::from(path).required(true)),
            None => Config::builder().add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.images.validate()
    }
}

/// Upstream API settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent as `x-rapidapi-key`
    pub key: String,
    /// Sent as `x-rapidapi-host`
    pub host: String,
    pub user_agent: String,
    /// Request timeout; unset leaves the transport default in place
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            key: String::new(),
            host: DEFAULT_API_HOST.to_string(),
            user_agent: format!("reelfeed/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
        }
    }
}

/// Poster cache bounds and output size
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Maximum number of cached posters
    pub max_entries: u64,
    /// Maximum total size of cached bitmaps, in bytes
    pub max_bytes: u64,
    pub poster_width: u32,
    pub poster_height: u32,
}

impl ImageConfig {
    /// Reject sizes the cache and the poster renderer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poster_width == 0 || self.poster_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "images.poster_width and images.poster_height must be non-zero (got {}x{})",
                self.poster_width, self.poster_height
            )));
        }
        if self.max_entries == 0 || self.max_bytes == 0 {
            return Err(ConfigError::Invalid(
                "images.max_entries and images.max_bytes must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            max_bytes: 50 * 1024 * 1024, // 50 MiB
            poster_width: 300,
            poster_height: 450,
        }
    }
}

/// Detail screen settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    /// Pause between the detail load and the similar-movies load
    pub similar_delay_ms: u64,
}

impl DetailConfig {
    pub fn similar_delay(&self) -> Duration {
        Duration::from_millis(self.similar_delay_ms)
    }
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            similar_delay_ms: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.host, DEFAULT_API_HOST);
        assert!(config.api.key.is_empty());
        assert!(config.api.timeout().is_none());
        assert_eq!(config.images.max_entries, 100);
        assert_eq!(config.images.max_bytes, 50 * 1024 * 1024);
        assert_eq!(
            (config.images.poster_width, config.images.poster_height),
            (300, 450)
        );
        assert_eq!(config.detail.similar_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_from_toml_keeps_unset_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            key = "secret"
            timeout_secs = 15

            [images]
            max_entries = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.api.key, "secret");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.api.host, DEFAULT_API_HOST);
        assert_eq!(config.images.max_entries, 10);
        assert_eq!(config.images.max_bytes, 50 * 1024 * 1024);
        assert_eq!(config.detail.similar_delay_ms, 500);
    }

    #[test]
    fn test_config_rejects_degenerate_images() {
        let zero_width = AppConfig::from_toml("[images]\nposter_width = 0\n");
        assert!(matches!(zero_width, Err(ConfigError::Invalid(_))));

        let zero_entries = AppConfig::from_toml("[images]\nmax_entries = 0\n");
        assert!(matches!(zero_entries, Err(ConfigError::Invalid(_))));

        assert!(AppConfig::default().validate().is_ok());
    }
}
