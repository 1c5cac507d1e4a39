use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool requested: {0}")]
    UnknownTool(String),
    #[error("invalid arguments for tool '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },
}

impl ToolError {
    pub fn invalid_arguments(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Text fed back to the model as the tool result.
    pub fn as_tool_output(&self) -> String {
        format!("Error: {self}")
    }

    pub fn user_message(&self) -> String {
        match self {
            ToolError::UnknownTool(name) => {
                format!("The model asked for a tool that is not available: \"{name}\".")
            }
            ToolError::InvalidArguments { tool, reason } => {
                format!("Tool \"{tool}\" received invalid arguments: {reason}")
            }
        }
    }
}
