//! Core of the Stratus weather assistant: configuration, the OpenAI-compatible
//! model client, local tools and the interactive chat loop.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{chat, preset, stdio, tooling};
pub use config::{AppConfig, ConfigError, ModelProviderConfig, ProviderProfile, WeatherConfig};
pub use domain::types;
pub use infrastructure::model;

use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber once. Logs go to stderr so the conversation
/// on stdout stays readable; `RUST_LOG` wins over the default level.
pub fn init_tracing(verbose: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let default_level = if verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
