use std::env;

use auth_core::SecretGenerator;
use auth_core::SigningConfig;
use auth_core::SigningConfigError;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub reset: ResetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub access_secret: Option<String>,
    pub refresh_secret: Option<String>,
    pub issuer: String,
    pub audience: String,
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64,
    #[serde(default = "default_refresh_expiry_days")]
    pub refresh_expiry_days: i64,
    #[serde(default)]
    pub clock_skew_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResetConfig {
    #[serde(default = "default_reset_token_length")]
    pub token_length: usize,
    #[serde(default = "default_reset_window_minutes")]
    pub window_minutes: i64,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            token_length: default_reset_token_length(),
            window_minutes: default_reset_window_minutes(),
        }
    }
}

fn default_expiry_minutes() -> i64 {
    15
}

fn default_refresh_expiry_days() -> i64 {
    7
}

fn default_reset_token_length() -> usize {
    32
}

fn default_reset_window_minutes() -> i64 {
    3
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__ISSUER, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__ACCESS_SECRET=... overrides jwt.access_secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Build the immutable signing configuration for this process.
    ///
    /// Secrets shorter than 32 bytes (or absent) are replaced with a fresh
    /// random one, which makes tokens from any prior process unverifiable
    /// after a restart.
    pub fn signing_config(&self) -> Result<SigningConfig, SigningConfigError> {
        let access_secret = secret_or_fallback(self.jwt.access_secret.as_deref(), "access");
        let refresh_secret = secret_or_fallback(self.jwt.refresh_secret.as_deref(), "refresh");

        let config = SigningConfig::new(
            access_secret,
            refresh_secret,
            self.jwt.issuer.clone(),
            self.jwt.audience.clone(),
        )?
        .with_access_ttl(Duration::minutes(self.jwt.expiry_minutes))
        .with_refresh_ttl(Duration::days(self.jwt.refresh_expiry_days))
        .with_clock_skew(Duration::seconds(self.jwt.clock_skew_seconds));

        Ok(config)
    }
}

fn secret_or_fallback(configured: Option<&str>, which: &str) -> Vec<u8> {
    match configured {
        Some(secret) if secret.len() >= SigningConfig::MIN_SECRET_BYTES => {
            secret.as_bytes().to_vec()
        }
        _ => {
            tracing::warn!(
                secret = which,
                "Signing secret absent or shorter than 32 bytes; generating a process-local one. \
                 Tokens issued before this restart will no longer verify"
            );
            SecretGenerator::new()
                .generate_bytes(SigningConfig::MIN_SECRET_BYTES)
                .into_bytes()
        }
    }
}
