//! Current conditions and forecast lookups against a WeatherAPI-compatible provider.
//!
//! Neither tool ever fails towards the chat loop: provider errors, transport
//! failures and unexpected payloads are all rendered as `Error: ...` text so
//! the model can explain them to the user.

use super::error::ToolError;
use super::{GET_CURRENT_WEATHER, GET_WEATHER_FORECAST, Tool, required_str};
use crate::config::WeatherConfig;
use crate::domain::tool::{ParamKind, ParameterSpec, ToolDescriptor};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_FORECAST_DAYS: i64 = 3;
pub const MIN_FORECAST_DAYS: i64 = 1;
pub const MAX_FORECAST_DAYS: i64 = 10;

const LOCATION_DESCRIPTION: &str =
    "The city and state, e.g., San Francisco, CA or country e.g., France";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather API key is not configured (set WEATHER_API_KEY)")]
    MissingApiKey,
    #[error("days must be between 1 and 10 (got {0})")]
    DaysOutOfRange(i64),
    #[error("weather provider request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response from weather provider: {0}")]
    Decode(#[from] serde_json::Error),
    /// Message reported by the provider itself in its `error` object.
    #[error("{0}")]
    Provider(String),
}

impl WeatherError {
    /// Text fed back to the model as the tool result.
    pub fn as_tool_output(&self) -> String {
        format!("Error: {self}")
    }
}

/// Report returned by `get_current_weather`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeatherReport {
    pub location: String,
    pub temperature_c: Number,
    pub temperature_f: Number,
    pub condition: String,
    pub humidity: Number,
    pub wind_kph: Number,
}

/// Report returned by `get_weather_forecast`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub location: String,
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub date: String,
    pub max_temp_c: Number,
    pub min_temp_c: Number,
    pub condition: String,
    pub chance_of_rain: Value,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct ProviderLocation {
    name: String,
}

#[derive(Deserialize)]
struct ProviderCondition {
    text: String,
}

#[derive(Deserialize)]
struct CurrentPayload {
    location: ProviderLocation,
    current: CurrentConditions,
}

#[derive(Deserialize)]
struct CurrentConditions {
    temp_c: Number,
    temp_f: Number,
    condition: ProviderCondition,
    humidity: Number,
    wind_kph: Number,
}

#[derive(Deserialize)]
struct ForecastPayload {
    location: ProviderLocation,
    forecast: ForecastBlock,
}

#[derive(Deserialize)]
struct ForecastBlock {
    forecastday: Vec<ProviderForecastDay>,
}

#[derive(Deserialize)]
struct ProviderForecastDay {
    date: String,
    day: ProviderDaySummary,
}

#[derive(Deserialize)]
struct ProviderDaySummary {
    maxtemp_c: Number,
    mintemp_c: Number,
    condition: ProviderCondition,
    #[serde(default)]
    daily_chance_of_rain: Value,
}

/// HTTP client for the weather provider.
#[derive(Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &WeatherConfig, http: Client) -> Self {
        Self::new(http, config.base_url.clone(), config.api_key.clone())
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub async fn current(&self, location: &str) -> Result<CurrentWeatherReport, WeatherError> {
        let payload = self
            .fetch("current.json", &[("q", location.to_string()), ("aqi", "no".into())])
            .await?;
        let payload: CurrentPayload = serde_json::from_value(payload)?;
        let current = payload.current;

        Ok(CurrentWeatherReport {
            location: payload.location.name,
            temperature_c: current.temp_c,
            temperature_f: current.temp_f,
            condition: current.condition.text,
            humidity: current.humidity,
            wind_kph: current.wind_kph,
        })
    }

    pub async fn forecast(&self, location: &str, days: i64) -> Result<ForecastReport, WeatherError> {
        if !(MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(WeatherError::DaysOutOfRange(days));
        }
        let payload = self
            .fetch(
                "forecast.json",
                &[
                    ("q", location.to_string()),
                    ("days", days.to_string()),
                    ("aqi", "no".into()),
                ],
            )
            .await?;
        let payload: ForecastPayload = serde_json::from_value(payload)?;

        let forecast = payload
            .forecast
            .forecastday
            .into_iter()
            .map(|entry| ForecastDay {
                date: entry.date,
                max_temp_c: entry.day.maxtemp_c,
                min_temp_c: entry.day.mintemp_c,
                condition: entry.day.condition.text,
                chance_of_rain: entry.day.daily_chance_of_rain,
            })
            .collect();

        Ok(ForecastReport {
            location: payload.location.name,
            forecast,
        })
    }

    /// GET `path` and return the decoded body, mapping a provider `error` object to an error.
    ///
    /// The provider reports failures with a 4xx status *and* a JSON body, so the
    /// body is decoded regardless of the status code.
    async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<Value, WeatherError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(WeatherError::MissingApiKey)?;
        let url = self.build_url(path);
        debug!(url = url.as_str(), "Requesting weather provider");

        let response = self
            .http
            .get(&url)
            .query(&[("key", api_key)])
            .query(params)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;

        if let Some(error) = value.get("error") {
            let message = serde_json::from_value::<ProviderErrorBody>(error.clone())
                .map(|body| body.message)
                .unwrap_or_else(|_| error.to_string());
            warn!(%status, message = message.as_str(), "Weather provider reported an error");
            return Err(WeatherError::Provider(message));
        }
        Ok(value)
    }
}

fn render<T: Serialize>(result: Result<T, WeatherError>) -> String {
    match result.and_then(|report| serde_json::to_string(&report).map_err(WeatherError::from)) {
        Ok(json) => json,
        Err(err) => err.as_tool_output(),
    }
}

pub struct CurrentWeatherTool {
    client: Arc<WeatherClient>,
    descriptor: ToolDescriptor,
}

impl CurrentWeatherTool {
    pub fn new(client: Arc<WeatherClient>) -> Self {
        let descriptor = ToolDescriptor::new(
            GET_CURRENT_WEATHER,
            "Get the current weather in a given location",
        )
        .param(ParameterSpec::required(
            "location",
            ParamKind::String,
            LOCATION_DESCRIPTION,
        ));
        Self { client, descriptor }
    }
}

#[async_trait]
impl Tool for CurrentWeatherTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, arguments: Value) -> Result<String, ToolError> {
        let location = required_str(GET_CURRENT_WEATHER, &arguments, "location")?;
        info!(location, "Fetching current weather");
        Ok(render(self.client.current(location).await))
    }
}

pub struct ForecastTool {
    client: Arc<WeatherClient>,
    descriptor: ToolDescriptor,
}

impl ForecastTool {
    pub fn new(client: Arc<WeatherClient>) -> Self {
        let descriptor = ToolDescriptor::new(
            GET_WEATHER_FORECAST,
            "Get the weather forecast for a location for a specific number of days",
        )
        .param(ParameterSpec::required(
            "location",
            ParamKind::String,
            LOCATION_DESCRIPTION,
        ))
        .param(
            ParameterSpec::optional(
                "days",
                ParamKind::Integer,
                "The number of days to forecast (1-10)",
            )
            .with_range(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS),
        );
        Self { client, descriptor }
    }
}

#[async_trait]
impl Tool for ForecastTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, arguments: Value) -> Result<String, ToolError> {
        let location = required_str(GET_WEATHER_FORECAST, &arguments, "location")?;
        let days = forecast_days(arguments.get("days"))?;
        info!(location, days, "Fetching weather forecast");
        Ok(render(self.client.forecast(location, days).await))
    }
}

/// Accepts an integer, an integral float or a numeric string; absent means the default.
fn forecast_days(value: Option<&Value>) -> Result<i64, ToolError> {
    let invalid = |found: &Value| {
        ToolError::invalid_arguments(
            GET_WEATHER_FORECAST,
            format!("'days' must be an integer, got {found}"),
        )
    };
    match value {
        None | Some(Value::Null) => Ok(DEFAULT_FORECAST_DAYS),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .ok_or_else(|| invalid(&Value::Number(number.clone()))),
        Some(Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(&Value::String(text.clone()))),
        Some(other) => Err(invalid(other)),
    }
}
