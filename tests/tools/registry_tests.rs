// Tool registry tests - lookup, argument decoding and dispatch of the offline tools

use reqwest::Client;
use serde_json::{Value, json};
use std::sync::Arc;
use stratus_core::preset::AgentPreset;
use stratus_core::tooling::{
    CALCULATOR, GET_CURRENT_WEATHER, GET_WEATHER_FORECAST, ToolError, ToolRegistry, WEB_SEARCH,
    WeatherClient,
};

fn registry() -> ToolRegistry {
    let weather = Arc::new(WeatherClient::new(
        Client::new(),
        "http://127.0.0.1:9",
        None,
    ));
    ToolRegistry::builtin(weather)
}

#[test]
fn builtin_registry_keeps_canonical_order() {
    assert_eq!(
        registry().names(),
        vec![GET_CURRENT_WEATHER, GET_WEATHER_FORECAST, CALCULATOR, WEB_SEARCH]
    );
}

#[test]
fn preset_subsets_follow_the_preset_tool_list() {
    let tools = registry();
    assert_eq!(
        tools.subset(AgentPreset::Basic.tool_names()).names(),
        vec![GET_CURRENT_WEATHER, GET_WEATHER_FORECAST]
    );
    assert_eq!(tools.subset(AgentPreset::ReAct.tool_names()).len(), 4);
    assert!(tools.subset(&["nope"]).is_empty());
}

#[test]
fn descriptors_serialize_as_openai_function_tools() {
    let tools = registry().descriptors();
    let calculator = tools
        .iter()
        .find(|tool| tool.name == CALCULATOR)
        .expect("calculator descriptor")
        .to_openai_tool();

    assert_eq!(calculator["type"], "function");
    assert_eq!(calculator["function"]["name"], "calculator");
    assert_eq!(calculator["function"]["parameters"]["type"], "object");
    assert_eq!(
        calculator["function"]["parameters"]["properties"]["expression"]["type"],
        "string"
    );
    assert_eq!(
        calculator["function"]["parameters"]["required"],
        json!(["expression"])
    );
}

#[tokio::test]
async fn calculator_round_trip_through_registry() {
    let tools = registry();
    assert_eq!(
        tools
            .invoke(CALCULATOR, r#"{"expression": "2 + 2"}"#)
            .await
            .unwrap(),
        "4"
    );
    assert_eq!(
        tools
            .invoke(CALCULATOR, r#"{"expression": "5 * (3 + 2)"}"#)
            .await
            .unwrap(),
        "25"
    );
    assert!(
        tools
            .invoke(CALCULATOR, r#"{"expression": "2 +"}"#)
            .await
            .unwrap()
            .starts_with("Error:")
    );
}

#[tokio::test]
async fn search_returns_json_payload() {
    let output = registry()
        .invoke(WEB_SEARCH, r#"{"query": "What will the weather forecast look like"}"#)
        .await
        .unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        value["result"],
        "Weather forecasts predict atmospheric conditions for a specific location and time period."
    );

    let miss = registry()
        .invoke(WEB_SEARCH, r#"{"query": "xyz"}"#)
        .await
        .unwrap();
    assert_eq!(
        miss,
        r#"{"query":"xyz","result":"No relevant information found."}"#
    );
}

#[tokio::test]
async fn unknown_tool_is_an_error() {
    let result = registry().invoke("get_stock_price", "{}").await;
    assert!(matches!(result, Err(ToolError::UnknownTool(name)) if name == "get_stock_price"));
}

#[tokio::test]
async fn malformed_arguments_are_rejected() {
    let tools = registry();
    for raw in ["{not json", "[1, 2]", r#"{"expression": 4}"#, "{}"] {
        let result = tools.invoke(CALCULATOR, raw).await;
        assert!(
            matches!(result, Err(ToolError::InvalidArguments { ref tool, .. }) if tool == CALCULATOR),
            "arguments {raw:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn weather_without_api_key_reports_error_text() {
    let output = registry()
        .invoke(GET_CURRENT_WEATHER, r#"{"location": "Paris"}"#)
        .await
        .unwrap();
    assert!(output.starts_with("Error:"), "got {output}");
}
