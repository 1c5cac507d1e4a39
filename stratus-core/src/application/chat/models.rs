use crate::tooling::ToolError;

/// One dispatched tool call and the text that was fed back to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStep {
    pub tool: String,
    pub call_id: String,
    pub arguments: String,
    pub success: bool,
    pub output: String,
}

/// Result of a single user turn.
#[derive(Debug, Default)]
pub struct TurnOutcome {
    /// Text to show the operator: the last transcript entry when it is an
    /// assistant message with non-empty content.
    pub reply: Option<String>,
    pub steps: Vec<ToolStep>,
    /// Calls naming a tool outside the active registry. These are never dispatched.
    pub skipped: Vec<ToolError>,
}

impl TurnOutcome {
    pub fn used_tools(&self) -> bool {
        !self.steps.is_empty()
    }
}
