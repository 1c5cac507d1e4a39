//! # Provider Configuration
//!
//! The assistant talks to one OpenAI-compatible chat endpoint chosen at startup
//! through the `MODEL_SERVER` selector.
//!
//! | Selector | API key var | Base URL var | Model var |
//! |----------|-------------|--------------|-----------|
//! | `GROQ` | `GROQ_API_KEY` | `GROQ_BASE_URL` | `GROQ_MODEL` |
//! | `NGU` | `NGU_API_KEY` | `NGU_BASE_URL` | `NGU_MODEL` |

use std::fmt;

/// Named provider profile selected by `MODEL_SERVER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderProfile {
    Groq,
    Ngu,
}

impl ProviderProfile {
    pub const ALL: [ProviderProfile; 2] = [ProviderProfile::Groq, ProviderProfile::Ngu];

    /// Environment prefix and selector value of this profile.
    pub fn id(self) -> &'static str {
        match self {
            ProviderProfile::Groq => "GROQ",
            ProviderProfile::Ngu => "NGU",
        }
    }

    /// Parse a selector value (case-insensitive, surrounding whitespace ignored).
    ///
    /// # Examples
    ///
    /// ```
    /// use stratus_core::config::ProviderProfile;
    ///
    /// assert_eq!(ProviderProfile::parse(" groq "), Some(ProviderProfile::Groq));
    /// assert_eq!(ProviderProfile::parse("NGU"), Some(ProviderProfile::Ngu));
    /// assert_eq!(ProviderProfile::parse("openai"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|profile| profile.id() == normalized)
    }

    pub fn api_key_var(self) -> String {
        format!("{}_API_KEY", self.id())
    }

    pub fn base_url_var(self) -> String {
        format!("{}_BASE_URL", self.id())
    }

    pub fn model_var(self) -> String {
        format!("{}_MODEL", self.id())
    }

    /// Comma-separated list of accepted selector values, for error messages.
    pub fn expected_values() -> String {
        Self::ALL
            .iter()
            .map(|profile| profile.id())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ProviderProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Resolved connection settings for the chat completion endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct ModelProviderConfig {
    pub profile: ProviderProfile,
    /// Base URL including the API version segment, e.g. `https://api.groq.com/openai/v1`
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

impl fmt::Debug for ModelProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelProviderConfig")
            .field("profile", &self.profile)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}
