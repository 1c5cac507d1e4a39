//! Local tools the model can call, and the registry that dispatches them by name.

pub mod calculator;
pub mod error;
pub mod registry;
pub mod search;
pub mod weather;

pub use calculator::CalculatorTool;
pub use error::ToolError;
pub use registry::ToolRegistry;
pub use search::WebSearchTool;
pub use weather::{CurrentWeatherTool, ForecastTool, WeatherClient, WeatherError};

use crate::domain::tool::ToolDescriptor;
use async_trait::async_trait;
use serde_json::Value;

pub const GET_CURRENT_WEATHER: &str = "get_current_weather";
pub const GET_WEATHER_FORECAST: &str = "get_weather_forecast";
pub const CALCULATOR: &str = "calculator";
pub const WEB_SEARCH: &str = "web_search";

/// A locally executed tool.
///
/// `invoke` receives the already-decoded argument object. Failures the model
/// should see (provider errors, network trouble) come back as `Ok("Error: ...")`;
/// `Err` is reserved for arguments that do not fit the descriptor.
#[async_trait]
pub trait Tool: Send + Sync {
    fn descriptor(&self) -> &ToolDescriptor;

    fn name(&self) -> &'static str {
        self.descriptor().name
    }

    async fn invoke(&self, arguments: Value) -> Result<String, ToolError>;
}

/// Read a required string argument.
pub(crate) fn required_str<'a>(
    tool: &str,
    arguments: &'a Value,
    key: &str,
) -> Result<&'a str, ToolError> {
    match arguments.get(key) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(other) => Err(ToolError::invalid_arguments(
            tool,
            format!("'{key}' must be a string, got {other}"),
        )),
        None => Err(ToolError::invalid_arguments(
            tool,
            format!("missing required argument '{key}'"),
        )),
    }
}
