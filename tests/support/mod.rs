// Shared helpers for the integration tests: a scripted model provider and a
// throwaway HTTP server for mocking remote endpoints.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use stratus_core::model::{ModelError, ModelProvider, ModelRequest, ModelResponse};
use stratus_core::types::{ChatMessage, ToolCall};

/// Replays canned responses in order and records every request it receives.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    responses: Arc<Mutex<VecDeque<Result<ModelResponse, ModelError>>>>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, content: &str) -> Self {
        self.push(Ok(ModelResponse::new(ChatMessage::assistant(
            Some(content.to_string()),
            Vec::new(),
        ))))
    }

    pub fn call_tools(self, calls: Vec<ToolCall>) -> Self {
        self.push(Ok(ModelResponse::new(ChatMessage::assistant(None, calls))))
    }

    pub fn respond(self, message: ChatMessage) -> Self {
        self.push(Ok(ModelResponse::new(message)))
    }

    pub fn fail(self, error: ModelError) -> Self {
        self.push(Err(error))
    }

    fn push(self, response: Result<ModelResponse, ModelError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::invalid_response("scripted", "script exhausted")))
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("mock server");
    });
    format!("http://{addr}")
}
