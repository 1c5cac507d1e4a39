use thiserror::Error;

/// Errors raised while resolving the startup configuration.
///
/// All of them are fatal: the chat loop never starts with a partial config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not set; expected one of: {expected}")]
    MissingSelector {
        var: &'static str,
        expected: String,
    },

    #[error("Unsupported MODEL_SERVER: {value}")]
    UnsupportedProvider { value: String },

    #[error("provider {provider} requires environment variable '{var}'")]
    MissingVariable { provider: String, var: String },

    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn missing_variable(provider: impl Into<String>, var: impl Into<String>) -> Self {
        Self::MissingVariable {
            provider: provider.into(),
            var: var.into(),
        }
    }

    pub fn invalid_value(
        var: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            var: var.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
