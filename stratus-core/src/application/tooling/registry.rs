use super::error::ToolError;
use super::weather::WeatherClient;
use super::{CalculatorTool, CurrentWeatherTool, ForecastTool, Tool, WebSearchTool};
use crate::domain::tool::ToolDescriptor;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Ordered name → tool mapping.
///
/// Order matters: it is the order descriptors are advertised to the model.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in tools, in their canonical order.
    pub fn builtin(weather: Arc<WeatherClient>) -> Self {
        Self::new()
            .with(Arc::new(CurrentWeatherTool::new(weather.clone())))
            .with(Arc::new(ForecastTool::new(weather)))
            .with(Arc::new(CalculatorTool::new()))
            .with(Arc::new(WebSearchTool::new()))
    }

    pub fn with(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    /// Add a tool; a tool with the same name is replaced in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(index) => self.tools[index] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|tool| tool.descriptor().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registry restricted to `names`, in the order given. Unknown names are ignored.
    pub fn subset(&self, names: &[&str]) -> Self {
        let tools = names
            .iter()
            .filter_map(|name| self.get(name).cloned())
            .collect();
        Self { tools }
    }

    /// Look up `name`, decode the JSON argument string and run the tool.
    pub async fn invoke(&self, name: &str, raw_arguments: &str) -> Result<String, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let arguments = parse_arguments(name, raw_arguments)?;
        debug!(tool = name, %arguments, "Invoking tool");
        tool.invoke(arguments).await
    }
}

/// Decode a tool-call argument string; an empty string means "no arguments".
pub fn parse_arguments(tool: &str, raw: &str) -> Result<Value, ToolError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(other) => Err(ToolError::invalid_arguments(
            tool,
            format!("expected a JSON object, got {other}"),
        )),
        Err(err) => Err(ToolError::invalid_arguments(tool, err.to_string())),
    }
}
