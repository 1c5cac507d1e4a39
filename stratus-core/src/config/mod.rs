pub mod app;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod provider;

pub use app::{AppConfig, WeatherConfig};
pub use error::ConfigError;
pub use provider::{ModelProviderConfig, ProviderProfile};
