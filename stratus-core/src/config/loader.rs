use super::AppConfig;
use super::app::WeatherConfig;
use super::defaults::{
    DEFAULT_ENV_FILE, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_WEATHER_BASE_URL, HTTP_TIMEOUT_VAR,
    SELECTOR_VAR, WEATHER_API_KEY_VAR, WEATHER_BASE_URL_VAR,
};
use super::error::ConfigError;
use super::provider::{ModelProviderConfig, ProviderProfile};
use dotenvy::from_filename;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tracing::{debug, info, warn};

static ENV_LOADER: Once = Once::new();

/// Loads variables from the dotenv file exactly once per process.
///
/// Variables already present in the environment win over the file.
pub fn ensure_env_loaded(path: Option<&Path>) {
    ENV_LOADER.call_once(|| {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_ENV_FILE));
        match from_filename(path) {
            Ok(loaded) => debug!(path = %loaded.display(), "Loaded environment file"),
            Err(err) if err.not_found() => {
                debug!(path = %path.display(), "No environment file found")
            }
            Err(err) => warn!(path = %path.display(), %err, "Failed to load environment file"),
        }
    });
}

/// Resolve and validate configuration from a key lookup
pub fn load_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let selector = get(SELECTOR_VAR).ok_or_else(|| ConfigError::MissingSelector {
        var: SELECTOR_VAR,
        expected: ProviderProfile::expected_values(),
    })?;
    let profile = ProviderProfile::parse(&selector).ok_or_else(|| {
        ConfigError::UnsupportedProvider {
            value: selector.to_ascii_uppercase(),
        }
    })?;

    let require = |var: String| {
        get(&var).ok_or_else(|| ConfigError::missing_variable(profile.id(), var))
    };
    let provider = ModelProviderConfig {
        profile,
        api_key: require(profile.api_key_var())?,
        endpoint: require(profile.base_url_var())?,
        model: require(profile.model_var())?,
    };

    let weather_key = get(WEATHER_API_KEY_VAR);
    if weather_key.is_none() {
        warn!(
            env_var = WEATHER_API_KEY_VAR,
            "Weather API key is not set; weather tools will report an error"
        );
    }
    let weather = WeatherConfig {
        api_key: weather_key,
        base_url: get(WEATHER_BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.to_string()),
    };

    let http_timeout = match get(HTTP_TIMEOUT_VAR) {
        None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        Some(raw) => parse_timeout(&raw)?,
    };

    info!(
        provider = %profile,
        model = provider.model.as_str(),
        endpoint = provider.endpoint.as_str(),
        "Resolved model provider configuration"
    );

    Ok(AppConfig {
        provider,
        weather,
        http_timeout,
    })
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::invalid_value(
            HTTP_TIMEOUT_VAR,
            raw,
            "timeout must be greater than zero",
        )),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(err) => Err(ConfigError::invalid_value(HTTP_TIMEOUT_VAR, raw, err.to_string())),
    }
}
