//! OpenAI-compatible client implementation (Groq and any chat-completions endpoint)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ModelProviderConfig;
use crate::config::defaults::CHAT_COMPLETIONS_PATH;
use crate::infrastructure::model::adapter::{MessageAdapter, OpenAIMessage};
use crate::infrastructure::model::traits::ModelProvider;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};

#[derive(Clone)]
pub struct OpenAIClient {
    base: HttpClientBase,
    api_path: String,
}

impl OpenAIClient {
    pub fn from_config(config: &ModelProviderConfig, http: Client) -> Self {
        Self {
            base: HttpClientBase::new(
                config.profile.id().to_string(),
                config.endpoint.clone(),
                config.api_key.clone(),
                http,
            ),
            api_path: CHAT_COMPLETIONS_PATH.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.base.id
    }

    pub fn completions_url(&self) -> String {
        self.base.build_url(&self.api_path)
    }
}

#[async_trait]
impl ModelProvider for OpenAIClient {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.completions_url();

        let payload = OpenAIRequest {
            model: request.model.clone(),
            messages: MessageAdapter::to_openai_format(&request.messages),
            tools: request.tools.iter().map(|tool| tool.to_openai_tool()).collect(),
            tool_choice: request.tool_choice.map(|choice| choice.as_str()),
        };

        info!(
            provider = self.base.id.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            tools = payload.tools.len(),
            "Sending request to OpenAI-compatible provider"
        );

        let response: OpenAIResponse = self.base.post_with_bearer(&url, &payload).await?;

        let message = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .ok_or_else(|| ModelError::invalid_response(&self.base.id, "missing message"))?;
        let message = MessageAdapter::from_openai_message(message);
        debug!(
            tool_calls = message.tool_calls.len(),
            has_content = message.content.is_some(),
            "Received response from OpenAI-compatible provider"
        );

        Ok(ModelResponse::new(message))
    }
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
}
