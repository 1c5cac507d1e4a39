use super::errors::ChatError;
use super::models::{ToolStep, TurnOutcome};
use crate::model::{ModelProvider, ModelRequest};
use crate::preset::AgentPreset;
use crate::tooling::{ToolError, ToolRegistry};
use crate::types::{ChatMessage, MessageRole, ToolCall};
use tracing::{debug, error, info, warn};

pub const EXIT_COMMANDS: [&str; 3] = ["exit", "quit", "bye"];

/// `true` for `exit`, `quit` or `bye`, ignoring case and surrounding whitespace.
pub fn is_exit_command(input: &str) -> bool {
    let input = input.trim();
    EXIT_COMMANDS
        .iter()
        .any(|command| command.eq_ignore_ascii_case(input))
}

/// A single conversation: the transcript plus everything needed to extend it.
pub struct ChatSession<P: ModelProvider> {
    provider: P,
    model: String,
    registry: ToolRegistry,
    transcript: Vec<ChatMessage>,
}

impl<P: ModelProvider> ChatSession<P> {
    pub fn new(
        provider: P,
        model: impl Into<String>,
        system_message: impl Into<String>,
        registry: ToolRegistry,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            registry,
            transcript: vec![ChatMessage::system(system_message)],
        }
    }

    /// Session using the preset's system message and the matching subset of `tools`.
    pub fn for_preset(
        provider: P,
        model: impl Into<String>,
        preset: AgentPreset,
        tools: &ToolRegistry,
    ) -> Self {
        let registry = tools.subset(preset.tool_names());
        info!(preset = %preset, tools = ?registry.names(), "Starting chat session");
        Self::new(provider, model, preset.system_message(), registry)
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one user turn. On a model failure the transcript is restored to
    /// what it was before the turn.
    pub async fn process_turn(&mut self, input: &str) -> Result<TurnOutcome, ChatError> {
        if input.trim().is_empty() {
            return Err(ChatError::EmptyInput);
        }
        let checkpoint = self.transcript.len();
        match self.run_turn(input).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                error!(error = %err, "Turn failed, discarding its messages");
                self.transcript.truncate(checkpoint);
                Err(err)
            }
        }
    }

    async fn run_turn(&mut self, input: &str) -> Result<TurnOutcome, ChatError> {
        self.transcript.push(ChatMessage::user(input));

        let request = ModelRequest::with_tools(
            self.model.clone(),
            self.transcript.clone(),
            self.registry.descriptors(),
        );
        let reply = self.provider.chat(request).await?.message;

        let mut outcome = TurnOutcome::default();
        let mut dispatchable = Vec::new();
        for call in reply.tool_calls {
            if self.registry.contains(call.name()) {
                dispatchable.push(call);
            } else {
                warn!(tool = call.name(), "Model requested a tool outside the active set");
                outcome
                    .skipped
                    .push(ToolError::UnknownTool(call.name().to_string()));
            }
        }

        let mut content = reply.content;
        if dispatchable.is_empty() {
            match content.take() {
                Some(text) => self.append(ChatMessage::assistant(Some(text), Vec::new())),
                None => debug!("Reply carried neither text nor dispatchable tool calls"),
            }
        }

        // Every outbound request must answer each tool call it carries, so a
        // multi-call reply is stored as one single-call assistant message per
        // dispatched call, each directly followed by its tool result.
        for call in dispatchable {
            self.append(ChatMessage::assistant(content.take(), vec![call.clone()]));

            let step = self.dispatch(&call).await;
            self.append(ChatMessage::tool(
                step.tool.clone(),
                Some(step.call_id.clone()),
                step.output.clone(),
            ));
            outcome.steps.push(step);

            let followup = self
                .provider
                .chat(ModelRequest::plain(self.model.clone(), self.transcript.clone()))
                .await?;
            if followup.message.has_tool_calls() {
                debug!("Ignoring tool calls requested in a follow-up reply");
            }
            let text = followup.message.content.unwrap_or_default();
            self.append(ChatMessage::assistant(Some(text), Vec::new()));
        }

        outcome.reply = self.latest_reply();
        Ok(outcome)
    }

    async fn dispatch(&self, call: &ToolCall) -> ToolStep {
        let name = call.name();
        let arguments = call.function.arguments.clone();
        info!(tool = name, "Executing tool call");
        let (success, output) = match self.registry.invoke(name, &arguments).await {
            Ok(output) => (!output.starts_with("Error:"), output),
            Err(err) => {
                warn!(tool = name, error = %err, "Tool call rejected");
                (false, err.as_tool_output())
            }
        };
        ToolStep {
            tool: name.to_string(),
            call_id: call.id.clone(),
            arguments,
            success,
            output,
        }
    }

    fn append(&mut self, message: ChatMessage) {
        debug!(
            role = message.role.as_str(),
            length = self.transcript.len() + 1,
            "Appending to transcript"
        );
        self.transcript.push(message);
    }

    fn latest_reply(&self) -> Option<String> {
        self.transcript
            .last()
            .filter(|message| message.role == MessageRole::Assistant)
            .and_then(|message| message.content.as_deref())
            .filter(|content| !content.trim().is_empty())
            .map(str::to_string)
    }
}
