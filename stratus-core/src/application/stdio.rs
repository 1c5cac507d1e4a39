//! Interactive console front-end: preset menu, banner and the `You:` loop.

use crate::chat::{ChatSession, is_exit_command};
use crate::model::ModelProvider;
use crate::preset::{AgentPreset, INVALID_PRESET_NOTICE, PRESET_PROMPT};
use thiserror::Error;
use tokio::io::{
    self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines, Stdin,
    Stdout,
};
use tracing::{debug, info, warn};

pub const BANNER: &str = "Weather Assistant: Hello! I can help you with weather information. Ask me about the weather anywhere!\n(Type 'exit' to end the conversation)\n\n";
pub const USER_PROMPT: &str = "You: ";
pub const FAREWELL: &str = "\nWeather Assistant: Goodbye! Have a great day!\n";

#[derive(Debug, Error)]
pub enum StdioError {
    #[error("stdin/stdout I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Line-oriented console over any async reader/writer pair.
pub struct Console<R, W> {
    lines: Lines<R>,
    writer: W,
}

impl Console<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            lines: reader.lines(),
            writer,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Ask for a preset; anything other than 1, 2 or 3 (including EOF) falls back to Basic.
    pub async fn choose_preset(&mut self) -> Result<AgentPreset, StdioError> {
        self.write(PRESET_PROMPT).await?;
        let answer = self.lines.next_line().await?.unwrap_or_default();
        match AgentPreset::from_choice(&answer) {
            Some(preset) => Ok(preset),
            None => {
                debug!(answer = answer.as_str(), "Unrecognised preset choice");
                self.write(&format!("{INVALID_PRESET_NOTICE}\n")).await?;
                Ok(AgentPreset::default())
            }
        }
    }

    /// Drive the conversation until an exit keyword or end of input.
    pub async fn run<P: ModelProvider>(
        &mut self,
        session: &mut ChatSession<P>,
    ) -> Result<(), StdioError> {
        self.write(BANNER).await?;

        loop {
            self.write(USER_PROMPT).await?;
            let Some(line) = self.lines.next_line().await? else {
                info!("Input closed, ending conversation");
                break;
            };
            if is_exit_command(&line) {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            match session.process_turn(&line).await {
                Ok(outcome) => {
                    for skipped in &outcome.skipped {
                        self.write(&format!("\n[{}]\n", skipped.user_message()))
                            .await?;
                    }
                    if let Some(reply) = outcome.reply {
                        self.write(&format!("\nWeather Assistant: {reply}\n\n"))
                            .await?;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "Turn aborted");
                    self.write(&format!("\nError: {}\n\n", err.user_message()))
                        .await?;
                }
            }
        }

        self.write(FAREWELL).await?;
        Ok(())
    }

    async fn write(&mut self, text: &str) -> Result<(), StdioError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
