pub const SELECTOR_VAR: &str = "MODEL_SERVER";
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";
pub const WEATHER_BASE_URL_VAR: &str = "WEATHER_BASE_URL";
pub const HTTP_TIMEOUT_VAR: &str = "HTTP_TIMEOUT_SECS";
pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.weatherapi.com/v1";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const CHAT_COMPLETIONS_PATH: &str = "chat/completions";
