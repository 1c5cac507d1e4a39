//! Message adapters - convert between the transcript and the chat-completions format

use crate::types::{ChatMessage, ToolCall};
use serde::Deserialize;
use serde_json::{Map, Value, json};

/// Adapter for converting messages to and from the OpenAI wire format
pub struct MessageAdapter;

impl MessageAdapter {
    /// Convert messages to OpenAI-style format
    ///
    /// Content is sent as `null` when absent, which the API accepts for
    /// assistant messages that only carry tool calls.
    pub fn to_openai_format(messages: &[ChatMessage]) -> Vec<Value> {
        messages.iter().map(Self::message_to_openai).collect()
    }

    fn message_to_openai(message: &ChatMessage) -> Value {
        let mut object = Map::new();
        object.insert("role".into(), json!(message.role.as_str()));
        object.insert(
            "content".into(),
            message.content.clone().map(Value::String).unwrap_or(Value::Null),
        );
        if let Some(name) = &message.name {
            object.insert("name".into(), json!(name));
        }
        if let Some(id) = &message.tool_call_id {
            object.insert("tool_call_id".into(), json!(id));
        }
        if !message.tool_calls.is_empty() {
            let calls: Vec<Value> = message
                .tool_calls
                .iter()
                .map(|call| {
                    json!({
                        "id": call.id,
                        "type": "function",
                        "function": {
                            "name": call.function.name,
                            "arguments": call.function.arguments,
                        }
                    })
                })
                .collect();
            object.insert("tool_calls".into(), Value::Array(calls));
        }
        Value::Object(object)
    }

    /// Convert the `message` object of a completion choice into an assistant message
    pub fn from_openai_message(message: OpenAIMessage) -> ChatMessage {
        let tool_calls = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall::new(call.id, call.function.name, call.function.arguments))
            .collect();
        ChatMessage::assistant(message.content, tool_calls)
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenAIMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<OpenAIToolCall>>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIToolCall {
    #[serde(default)]
    pub id: String,
    pub function: OpenAIFunction,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}
