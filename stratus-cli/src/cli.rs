use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use stratus_core::preset::AgentPreset;

#[derive(Parser, Debug)]
#[command(
    name = "stratus",
    version,
    about = "Conversational weather assistant backed by an OpenAI-compatible model"
)]
pub struct Cli {
    /// Agent preset; when omitted the preset is chosen interactively
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,
    /// Dotenv file to load instead of `.env`
    #[arg(long)]
    pub env_file: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PresetArg {
    Basic,
    ChainOfThought,
    React,
}

impl From<PresetArg> for AgentPreset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Basic => AgentPreset::Basic,
            PresetArg::ChainOfThought => AgentPreset::ChainOfThought,
            PresetArg::React => AgentPreset::ReAct,
        }
    }
}
