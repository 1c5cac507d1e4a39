// Chat session tests - transcript shape across tool-calling turns, driven by a scripted provider

#[path = "../support/mod.rs"]
mod support;

use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use stratus_core::chat::{ChatError, ChatSession};
use stratus_core::model::adapter::MessageAdapter;
use stratus_core::model::{ModelError, ModelRequest, ToolChoice};
use stratus_core::preset::{AgentPreset, BASIC_SYSTEM_MESSAGE};
use stratus_core::tooling::{CALCULATOR, GET_CURRENT_WEATHER, ToolError, ToolRegistry, WeatherClient};
use stratus_core::types::{ChatMessage, MessageRole, ToolCall};
use support::ScriptedProvider;

fn tools() -> ToolRegistry {
    // Port 9 is the discard port; nothing answers, so weather calls fail fast.
    let weather = Arc::new(WeatherClient::new(
        Client::new(),
        "http://127.0.0.1:9/v1",
        Some("test-key".into()),
    ));
    ToolRegistry::builtin(weather)
}

fn session(provider: ScriptedProvider, preset: AgentPreset) -> ChatSession<ScriptedProvider> {
    ChatSession::for_preset(provider, "llama-test", preset, &tools())
}

fn roles(session: &ChatSession<ScriptedProvider>) -> Vec<MessageRole> {
    session.transcript().iter().map(|message| message.role).collect()
}

/// Tool-call ids carried by each outbound assistant message, paired with the
/// ids answered by the tool messages that directly follow it.
fn wire_tool_calls(request: &ModelRequest) -> Vec<(Vec<String>, Vec<String>)> {
    let wire = MessageAdapter::to_openai_format(&request.messages);
    let mut pairs = Vec::new();
    for (index, message) in wire.iter().enumerate() {
        let Some(calls) = message["tool_calls"].as_array() else {
            continue;
        };
        let requested: Vec<String> = calls
            .iter()
            .map(|call| call["id"].as_str().unwrap_or_default().to_string())
            .collect();
        let answered: Vec<String> = wire[index + 1..]
            .iter()
            .take_while(|next| next["role"] == "tool")
            .map(|next| next["tool_call_id"].as_str().unwrap_or_default().to_string())
            .collect();
        pairs.push((requested, answered));
    }
    pairs
}

fn assert_every_call_answered(provider: &ScriptedProvider) {
    for (number, request) in provider.requests().iter().enumerate() {
        for (requested, answered) in wire_tool_calls(request) {
            assert_eq!(
                requested, answered,
                "request #{number} carries unanswered tool calls"
            );
        }
    }
}

#[tokio::test]
async fn plain_reply_appends_user_and_assistant() {
    let provider = ScriptedProvider::new().reply("Hi! Ask me about the weather.");
    let mut chat = session(provider.clone(), AgentPreset::Basic);

    let outcome = chat.process_turn("hello").await.expect("turn");

    assert_eq!(outcome.reply.as_deref(), Some("Hi! Ask me about the weather."));
    assert!(!outcome.used_tools());
    assert_eq!(
        roles(&chat),
        vec![MessageRole::System, MessageRole::User, MessageRole::Assistant]
    );
    assert_eq!(chat.transcript()[0].text(), BASIC_SYSTEM_MESSAGE);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].tool_choice, Some(ToolChoice::Auto));
    let advertised: Vec<&str> = requests[0].tools.iter().map(|tool| tool.name).collect();
    assert_eq!(advertised, vec![GET_CURRENT_WEATHER, "get_weather_forecast"]);
}

#[tokio::test]
async fn tool_call_yields_one_tool_message_and_one_followup() {
    let provider = ScriptedProvider::new()
        .call_tools(vec![ToolCall::new(
            "call_paris",
            GET_CURRENT_WEATHER,
            r#"{"location": "Paris"}"#,
        )])
        .reply("I couldn't reach the weather service for Paris right now.");
    let mut chat = session(provider.clone(), AgentPreset::Basic);

    let outcome = chat
        .process_turn("What's the weather in Paris?")
        .await
        .expect("turn");

    assert_eq!(
        roles(&chat),
        vec![
            MessageRole::System,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::Tool,
            MessageRole::Assistant,
        ]
    );
    let tool_message = &chat.transcript()[3];
    assert_eq!(tool_message.name.as_deref(), Some(GET_CURRENT_WEATHER));
    assert_eq!(tool_message.tool_call_id.as_deref(), Some("call_paris"));
    assert!(tool_message.text().starts_with("Error:"));

    assert_eq!(outcome.steps.len(), 1);
    assert_eq!(outcome.steps[0].tool, GET_CURRENT_WEATHER);
    assert!(!outcome.steps[0].success);
    assert_eq!(
        outcome.reply.as_deref(),
        Some("I couldn't reach the weather service for Paris right now.")
    );

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[1].tools.is_empty());
    assert_eq!(requests[1].tool_choice, None);
    assert_eq!(requests[1].messages.len(), 4);
}

#[tokio::test]
async fn each_tool_call_gets_its_own_followup() {
    let provider = ScriptedProvider::new()
        .call_tools(vec![
            ToolCall::new("a", CALCULATOR, r#"{"expression": "2 + 2"}"#),
            ToolCall::new("b", CALCULATOR, r#"{"expression": "5 * (3 + 2)"}"#),
        ])
        .reply("2 + 2 is 4.")
        .reply("And 5 * (3 + 2) is 25.");
    let mut chat = session(provider.clone(), AgentPreset::ChainOfThought);

    let outcome = chat.process_turn("Do some maths").await.expect("turn");

    assert_eq!(
        roles(&chat),
        vec![
            MessageRole::System,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::Tool,
            MessageRole::Assistant,
            MessageRole::Assistant,
            MessageRole::Tool,
            MessageRole::Assistant,
        ]
    );
    let tool_outputs: Vec<&str> = chat
        .transcript()
        .iter()
        .filter(|message| message.role == MessageRole::Tool)
        .map(|message| message.text())
        .collect();
    assert_eq!(tool_outputs, vec!["4", "25"]);
    assert!(outcome.steps.iter().all(|step| step.success));
    assert_eq!(outcome.reply.as_deref(), Some("And 5 * (3 + 2) is 25."));
    assert_eq!(provider.request_count(), 3);

    let requests = provider.requests();
    assert_eq!(
        wire_tool_calls(&requests[1]),
        vec![(vec!["a".to_string()], vec!["a".to_string()])]
    );
    assert_eq!(wire_tool_calls(&requests[2]).len(), 2);
    assert_every_call_answered(&provider);
}

#[tokio::test]
async fn tool_outside_the_preset_is_not_dispatched() {
    let provider = ScriptedProvider::new()
        .call_tools(vec![ToolCall::new(
            "c",
            CALCULATOR,
            r#"{"expression": "1 + 1"}"#,
        )])
        .reply("Sure, what city?");
    let mut chat = session(provider.clone(), AgentPreset::Basic);

    let outcome = chat.process_turn("add one and one").await.expect("turn");

    assert!(outcome.steps.is_empty());
    assert!(matches!(
        outcome.skipped.as_slice(),
        [ToolError::UnknownTool(name)] if name == CALCULATOR
    ));
    assert!(
        chat.transcript()
            .iter()
            .all(|message| message.role != MessageRole::Tool && message.tool_calls.is_empty())
    );
    assert_eq!(outcome.reply, None);
    assert_eq!(provider.request_count(), 1);

    // The skipped call must not leak into the next turn's request.
    chat.process_turn("weather in Oslo").await.expect("next turn");
    assert!(wire_tool_calls(&provider.requests()[1]).is_empty());
    assert_every_call_answered(&provider);
}

#[tokio::test]
async fn mixed_known_and_unknown_calls_only_carry_the_dispatched_one() {
    let provider = ScriptedProvider::new()
        .call_tools(vec![
            ToolCall::new("s", "web_search", r#"{"query": "climate change"}"#),
            ToolCall::new("c", CALCULATOR, r#"{"expression": "6 * 7"}"#),
        ])
        .reply("6 * 7 is 42.")
        .reply("Anything else?");
    let mut chat = session(provider.clone(), AgentPreset::ChainOfThought);

    let outcome = chat.process_turn("multiply and search").await.expect("turn");
    assert_eq!(outcome.steps.len(), 1);
    assert_eq!(outcome.skipped.len(), 1);

    chat.process_turn("thanks").await.expect("next turn");
    let requests = provider.requests();
    assert_eq!(
        wire_tool_calls(&requests[1]),
        vec![(vec!["c".to_string()], vec!["c".to_string()])]
    );
    assert_every_call_answered(&provider);
}

#[tokio::test]
async fn assistant_text_is_kept_on_the_first_tool_call_message() {
    let provider = ScriptedProvider::new()
        .respond(ChatMessage::assistant(
            Some("Let me check.".into()),
            vec![ToolCall::new("p", CALCULATOR, r#"{"expression": "1 + 1"}"#)],
        ))
        .reply("It is 2.");
    let mut chat = session(provider, AgentPreset::ChainOfThought);

    chat.process_turn("one plus one").await.expect("turn");

    let carrier = &chat.transcript()[2];
    assert_eq!(carrier.text(), "Let me check.");
    assert_eq!(carrier.tool_calls.len(), 1);
}

#[tokio::test]
async fn invalid_argument_json_is_fed_back_to_the_model() {
    let provider = ScriptedProvider::new()
        .call_tools(vec![ToolCall::new("d", CALCULATOR, "{expression: 2}")])
        .reply("Sorry, I sent malformed arguments.");
    let mut chat = session(provider, AgentPreset::ChainOfThought);

    let outcome = chat.process_turn("calc").await.expect("turn");

    let tool_message = &chat.transcript()[3];
    assert_eq!(tool_message.role, MessageRole::Tool);
    assert!(
        tool_message
            .text()
            .starts_with("Error: invalid arguments for tool 'calculator'")
    );
    assert!(!outcome.steps[0].success);
}

#[tokio::test]
async fn search_results_are_appended_without_reencoding() {
    let provider = ScriptedProvider::new()
        .call_tools(vec![ToolCall::new(
            "s",
            "web_search",
            r#"{"query": "climate change"}"#,
        )])
        .reply("Climate change is about long-term shifts.");
    let mut chat = session(provider, AgentPreset::ReAct);

    chat.process_turn("what is climate change").await.expect("turn");

    let content = chat.transcript()[3].text();
    let value: Value = serde_json::from_str(content).expect("tool output is a JSON object");
    assert_eq!(value["query"], "climate change");
}

#[tokio::test]
async fn model_failure_rolls_back_the_turn() {
    let provider = ScriptedProvider::new()
        .reply("First answer.")
        .fail(ModelError::invalid_response("GROQ", "boom"));
    let mut chat = session(provider, AgentPreset::Basic);

    chat.process_turn("first").await.expect("first turn");
    let before = chat.transcript().to_vec();

    let error = chat.process_turn("second").await.expect_err("second turn fails");
    assert!(matches!(error, ChatError::Model(ModelError::InvalidResponse { .. })));
    assert_eq!(error.user_message(), "The response from 'GROQ' was not valid.");
    assert_eq!(chat.transcript(), before.as_slice());
}

#[tokio::test]
async fn failed_followup_discards_the_tool_message_too() {
    let provider = ScriptedProvider::new()
        .call_tools(vec![ToolCall::new("e", CALCULATOR, r#"{"expression": "3 * 3"}"#)])
        .fail(ModelError::invalid_response("GROQ", "truncated"));
    let mut chat = session(provider, AgentPreset::ChainOfThought);

    assert!(chat.process_turn("three squared").await.is_err());
    assert_eq!(roles(&chat), vec![MessageRole::System]);
}

#[tokio::test]
async fn blank_input_never_reaches_the_model() {
    let provider = ScriptedProvider::new();
    let mut chat = session(provider.clone(), AgentPreset::Basic);

    let result = chat.process_turn("   ").await;
    assert!(matches!(result, Err(ChatError::EmptyInput)));
    assert_eq!(provider.request_count(), 0);
    assert_eq!(chat.transcript().len(), 1);
}
