//! Agent presets: a system message plus the tool set offered to the model.

use super::tooling::{CALCULATOR, GET_CURRENT_WEATHER, GET_WEATHER_FORECAST, WEB_SEARCH};
use std::fmt;

pub const BASIC_SYSTEM_MESSAGE: &str = "You are a helpful weather assistant.";

pub const CHAIN_OF_THOUGHT_SYSTEM_MESSAGE: &str = "You are a helpful assistant that can answer questions about weather and perform calculations.

When responding to complex questions, please follow these steps:
1. Think step-by-step about what information you need
2. Break down the problem into smaller parts
3. Use the appropriate tools to gather information
4. Explain your reasoning clearly
5. Provide a clear final answer
";

pub const REACT_SYSTEM_MESSAGE: &str = "You are a helpful weather and information assistant that uses the ReAct (Reasoning and Acting) approach to solve problems.

When responding to questions, follow this pattern:
1. Thought: Think about what you need to know and what steps to take
2. Action: Use a tool to gather information (weather data, search, calculator)
3. Observation: Review what you learned from the tool
4. ... (repeat the Thought, Action, Observation steps as needed)
5. Final Answer: Provide your response based on all observations
";

pub const PRESET_PROMPT: &str =
    "Choose an agent type (1: Basic, 2: Chain of Thought, 3: ReAct): ";
pub const INVALID_PRESET_NOTICE: &str = "Invalid choice. Defaulting to Basic agent.";

const BASIC_TOOLS: &[&str] = &[GET_CURRENT_WEATHER, GET_WEATHER_FORECAST];
const CHAIN_OF_THOUGHT_TOOLS: &[&str] = &[GET_CURRENT_WEATHER, GET_WEATHER_FORECAST, CALCULATOR];
const REACT_TOOLS: &[&str] = &[
    GET_CURRENT_WEATHER,
    GET_WEATHER_FORECAST,
    CALCULATOR,
    WEB_SEARCH,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentPreset {
    #[default]
    Basic,
    ChainOfThought,
    ReAct,
}

impl AgentPreset {
    pub const ALL: [AgentPreset; 3] = [
        AgentPreset::Basic,
        AgentPreset::ChainOfThought,
        AgentPreset::ReAct,
    ];

    pub fn system_message(self) -> &'static str {
        match self {
            AgentPreset::Basic => BASIC_SYSTEM_MESSAGE,
            AgentPreset::ChainOfThought => CHAIN_OF_THOUGHT_SYSTEM_MESSAGE,
            AgentPreset::ReAct => REACT_SYSTEM_MESSAGE,
        }
    }

    /// Tool names offered to the model, in advertised order.
    pub fn tool_names(self) -> &'static [&'static str] {
        match self {
            AgentPreset::Basic => BASIC_TOOLS,
            AgentPreset::ChainOfThought => CHAIN_OF_THOUGHT_TOOLS,
            AgentPreset::ReAct => REACT_TOOLS,
        }
    }

    /// Map the interactive menu answer (`"1"`, `"2"`, `"3"`) to a preset.
    ///
    /// ```
    /// use stratus_core::preset::AgentPreset;
    ///
    /// assert_eq!(AgentPreset::from_choice(" 2 "), Some(AgentPreset::ChainOfThought));
    /// assert_eq!(AgentPreset::from_choice("4"), None);
    /// ```
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(AgentPreset::Basic),
            "2" => Some(AgentPreset::ChainOfThought),
            "3" => Some(AgentPreset::ReAct),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgentPreset::Basic => "basic",
            AgentPreset::ChainOfThought => "chain-of-thought",
            AgentPreset::ReAct => "react",
        }
    }
}

impl fmt::Display for AgentPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
