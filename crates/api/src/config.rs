use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub seo: SeoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Pool settings in the shape the persistence crate expects.
    pub fn pool_config(&self) -> persistence::db::DatabaseConfig {
        persistence::db::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout_secs: self.connect_timeout_secs,
            idle_timeout_secs: self.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Requests per minute per client IP on the function routes. 0 disables.
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,

    /// SHA-256 hex digest of the admin key. Empty disables the admin API.
    #[serde(default)]
    pub admin_key_sha256: String,

    #[serde(default)]
    pub hsts_enabled: bool,

    /// Key the rate limiter on `X-Forwarded-For` / `X-Real-IP`. Only enable
    /// behind a reverse proxy that overwrites those headers.
    #[serde(default)]
    pub trust_forwarded_headers: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeoConfig {
    /// Public origin of the site, e.g. `https://deen.example.org`.
    pub site_url: String,

    /// Absolute sitemap URL sent to search engines. Defaults to
    /// `{site_url}/sitemap.xml`.
    #[serde(default)]
    pub sitemap_url: Option<String>,

    #[serde(default = "default_sitemap_cache_max_age")]
    pub sitemap_cache_max_age_secs: u64,

    #[serde(default = "default_ping_window")]
    pub ping_window_secs: u64,

    #[serde(default = "default_google_ping_url")]
    pub google_ping_url: String,

    #[serde(default = "default_bing_ping_url")]
    pub bing_ping_url: String,

    #[serde(default = "default_indexnow_endpoint")]
    pub indexnow_endpoint: String,

    #[serde(default = "default_outbound_timeout")]
    pub outbound_timeout_secs: u64,

    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u32,
}

impl SeoConfig {
    pub fn site_origin(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    pub fn sitemap_url(&self) -> String {
        match self.sitemap_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("{}/sitemap.xml", self.site_origin()),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_rate_limit() -> u32 {
    60
}
fn default_sitemap_cache_max_age() -> u64 {
    3600
}
fn default_ping_window() -> u64 {
    600
}
fn default_google_ping_url() -> String {
    "https://www.google.com/ping".to_string()
}
fn default_bing_ping_url() -> String {
    "https://www.bing.com/ping".to_string()
}
fn default_indexnow_endpoint() -> String {
    "https://api.indexnow.org/indexnow".to_string()
}
fn default_outbound_timeout() -> u64 {
    10
}
fn default_log_retention_days() -> u32 {
    90
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with DEEN__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("DEEN").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds the config from embedded defaults so tests do not depend on
    /// the working directory.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30

            [database]
            url = ""
            max_connections = 20
            min_connections = 2
            connect_timeout_secs = 10
            idle_timeout_secs = 600

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []
            rate_limit_per_minute = 60
            admin_key_sha256 = ""

            [seo]
            site_url = "https://deen.example.org"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        // Skip validation in tests to allow partial configs
        Ok(cfg)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "DEEN__DATABASE__URL environment variable must be set".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.socket_addr().is_err() {
            return Err(ConfigValidationError::InvalidValue(format!(
                "Invalid server address {}:{}",
                self.server.host, self.server.port
            )));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        match reqwest::Url::parse(&self.seo.site_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {}
            _ => {
                return Err(ConfigValidationError::InvalidValue(format!(
                    "seo.site_url must be an absolute http(s) URL, got {:?}",
                    self.seo.site_url
                )))
            }
        }

        let key = self.security.admin_key_sha256.trim();
        if !key.is_empty() && (key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit())) {
            return Err(ConfigValidationError::InvalidValue(
                "security.admin_key_sha256 must be a 64 character hex digest".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
