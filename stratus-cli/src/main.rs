mod cli;

use clap::Parser;
use cli::Cli;
use std::error::Error;
use std::sync::Arc;
use stratus_core::chat::ChatSession;
use stratus_core::config::AppConfig;
use stratus_core::infrastructure::http::build_http_client;
use stratus_core::model::OpenAIClient;
use stratus_core::preset::AgentPreset;
use stratus_core::stdio::Console;
use stratus_core::tooling::{ToolRegistry, WeatherClient};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    stratus_core::init_tracing(cli.verbose);

    let config = AppConfig::load(cli.env_file.as_deref())?;
    let http = build_http_client(config.http_timeout)?;
    let provider = OpenAIClient::from_config(&config.provider, http.clone());
    let weather = Arc::new(WeatherClient::from_config(&config.weather, http));
    let tools = ToolRegistry::builtin(weather);

    let mut console = Console::stdio();
    let preset = match cli.preset {
        Some(preset) => AgentPreset::from(preset),
        None => console.choose_preset().await?,
    };

    let mut session =
        ChatSession::for_preset(provider, config.provider.model.clone(), preset, &tools);
    console.run(&mut session).await?;

    info!(
        messages = session.transcript().len(),
        "Conversation finished"
    );
    Ok(())
}
