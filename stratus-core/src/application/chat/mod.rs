mod errors;
mod models;
mod session;

pub use errors::ChatError;
pub use models::{ToolStep, TurnOutcome};
pub use session::{ChatSession, EXIT_COMMANDS, is_exit_command};
