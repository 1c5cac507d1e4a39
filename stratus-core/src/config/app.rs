use super::error::ConfigError;
use super::provider::ModelProviderConfig;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Weather provider settings shared by both weather tools.
#[derive(Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Application configuration resolved once from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub provider: ModelProviderConfig,
    pub weather: WeatherConfig,
    pub http_timeout: Duration,
}

impl AppConfig {
    /// Load the dotenv file (if any) and resolve configuration from the process environment.
    pub fn load(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::ensure_env_loaded(env_file);
        Self::from_env()
    }

    /// Resolve configuration from the current process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        super::loader::load_config(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        super::loader::load_config(lookup)
    }
}
