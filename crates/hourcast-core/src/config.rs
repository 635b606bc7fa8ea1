use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Environment variable consulted when the config file carries no API key.
pub const API_KEY_ENV: &str = "HOURCAST_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Cache backend settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Upstream weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Time resolution provider settings
    #[serde(default)]
    pub time: TimeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener on
    pub host: String,

    /// Port to bind the HTTP listener on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache backend connection URL
    pub url: String,

    /// Entry lifetime in seconds. One day matches the validity of a
    /// "today's hourly forecast" payload.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379/0".to_string(),
            ttl_secs: 86_400,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Upstream timeline API base, including trailing slash; the location
    /// segment is appended verbatim.
    pub base_url: String,

    /// Upstream API key (can be set via HOURCAST_API_KEY)
    pub api_key: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url:
                "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline/"
                    .to_string(),
            api_key: std::env::var(API_KEY_ENV).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// Forward geocoding service base URL
    pub geocode_url: String,

    /// Timezone-by-coordinate service base URL
    pub timezone_url: String,

    /// Timezone-name time service base URL (fallback path)
    pub worldtime_url: String,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            geocode_url: "https://nominatim.openstreetmap.org".to_string(),
            timezone_url: "https://timeapi.io".to_string(),
            worldtime_url: "http://worldtimeapi.org".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            weather: WeatherConfig::default(),
            time: TimeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let mut config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        // Environment wins only when the file left the key blank.
        if config.weather.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                config.weather.api_key = key;
            }
        }

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_http_url(&self.weather.base_url, "weather.base_url", &mut result);
        self.validate_http_url(&self.time.geocode_url, "time.geocode_url", &mut result);
        self.validate_http_url(&self.time.timezone_url, "time.timezone_url", &mut result);
        self.validate_http_url(&self.time.worldtime_url, "time.worldtime_url", &mut result);

        // The provider appends "<location>/today" directly to the base.
        if !self.weather.base_url.is_empty() && !self.weather.base_url.ends_with('/') {
            result.add_warning(
                "weather.base_url",
                "Base URL does not end with '/'; the location segment is appended verbatim",
            );
        }

        if self.weather.api_key.is_empty() {
            result.add_error(
                "weather.api_key",
                format!("API key is not set (config file or {} environment variable)", API_KEY_ENV),
            );
        }

        match Url::parse(&self.cache.url) {
            Ok(url) if url.scheme() == "redis" || url.scheme() == "rediss" => {}
            Ok(url) => {
                result.add_error(
                    "cache.url",
                    format!("Cache URL must use the redis scheme, got: {}", url.scheme()),
                );
            }
            Err(e) => {
                result.add_error("cache.url", format!("Invalid URL: {}", e));
            }
        }

        if self.cache.ttl_secs == 0 {
            result.add_error("cache.ttl_secs", "Cache TTL must be greater than 0");
        } else if self.cache.ttl_secs > 7 * 86_400 {
            result.add_warning(
                "cache.ttl_secs",
                "Cache TTL is more than a week; entries will long outlive their forecast day",
            );
        }

        if self.server.port == 0 {
            result.add_error("server.port", "Port cannot be 0");
        }

        result
    }

    /// Validate a URL field
    fn validate_http_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("hourcast");

        Ok(config_dir.join("config.toml"))
    }
}
