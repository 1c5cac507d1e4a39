//! Toy "web search" over a fixed set of canned answers.

use super::error::ToolError;
use super::{Tool, WEB_SEARCH, required_str};
use crate::domain::tool::{ParamKind, ParameterSpec, ToolDescriptor};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashSet;
use tracing::debug;

pub const NO_RESULT: &str = "No relevant information found.";

/// Topic phrase → canned explanation. Order is the tie-break order.
pub const SEARCH_RESULTS: [(&str, &str); 4] = [
    (
        "weather forecast",
        "Weather forecasts predict atmospheric conditions for a specific location and time period.",
    ),
    (
        "temperature conversion",
        "To convert Celsius to Fahrenheit: multiply by 9/5 and add 32.",
    ),
    (
        "climate change",
        "Climate change refers to significant changes in global temperature and weather patterns.",
    ),
    (
        "severe weather",
        "Severe weather includes thunderstorms, tornadoes, hurricanes, and blizzards.",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub query: String,
    pub result: String,
}

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Best-matching entry by shared-word count; the earliest entry wins ties.
/// `None` when no entry shares a word with the query.
pub fn best_match<'a>(
    query: &str,
    entries: &'a [(&'a str, &'a str)],
) -> Option<&'a (&'a str, &'a str)> {
    let query_words = word_set(query);
    let mut best: Option<&(&str, &str)> = None;
    let mut best_score = 0;

    for entry in entries {
        let score = word_set(entry.0).intersection(&query_words).count();
        if score > best_score {
            best = Some(entry);
            best_score = score;
        }
    }
    best
}

pub fn search(query: &str) -> SearchResult {
    let result = best_match(query, &SEARCH_RESULTS)
        .map(|(_, explanation)| *explanation)
        .unwrap_or(NO_RESULT);
    SearchResult {
        query: query.to_string(),
        result: result.to_string(),
    }
}

pub struct WebSearchTool {
    descriptor: ToolDescriptor,
}

impl WebSearchTool {
    pub fn new() -> Self {
        let descriptor = ToolDescriptor::new(WEB_SEARCH, "Search for information on the web")
            .param(ParameterSpec::required(
                "query",
                ParamKind::String,
                "The search query",
            ));
        Self { descriptor }
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, arguments: Value) -> Result<String, ToolError> {
        let query = required_str(WEB_SEARCH, &arguments, "query")?;
        let result = search(query);
        debug!(query, matched = result.result != NO_RESULT, "Canned search");
        Ok(json!({ "query": result.query, "result": result.result }).to_string())
    }
}
