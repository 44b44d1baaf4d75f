//! Token and token-resolution configuration types

use std::fmt;
use std::sync::Arc;

/// Environment variable consulted by default
pub const DEFAULT_TOKEN_ENV_VAR: &str = "NOTION_TOKEN";

/// Prompt shown when asking for a token interactively
pub const TOKEN_PROMPT: &str = "Enter Notion API Integration Token: ";

/// A Notion integration token.
///
/// The value is never exposed in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct NotionToken(String);

impl NotionToken {
    /// Create a token from a raw string (surrounding whitespace is trimmed)
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Returns the token value for use in the Authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check if the token is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for NotionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NotionToken").field(&"[REDACTED]").finish()
    }
}

/// Source of interactively entered tokens
pub trait TokenPrompt: Send + Sync {
    /// Show `message` and read one line of input
    fn prompt(&self, message: &str) -> std::io::Result<String>;
}

/// Terminal prompt with hidden input
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskedPrompt;

impl TokenPrompt for MaskedPrompt {
    fn prompt(&self, message: &str) -> std::io::Result<String> {
        rpassword::prompt_password(message)
    }
}

/// What to do when the environment variable is not set
#[derive(Clone, Default)]
pub enum PromptStrategy {
    /// Ask on the terminal with masked input
    #[default]
    Masked,
    /// Fail with `Error::MissingToken`
    Disabled,
    /// Ask through a caller-provided prompt
    Custom(Arc<dyn TokenPrompt>),
}

impl PromptStrategy {
    /// Create a custom strategy
    pub fn custom(prompt: impl TokenPrompt + 'static) -> Self {
        Self::Custom(Arc::new(prompt))
    }
}

impl fmt::Debug for PromptStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Masked => f.write_str("Masked"),
            Self::Disabled => f.write_str("Disabled"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Configuration for token resolution
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Environment variable holding the token
    pub env_var: String,
    /// Fallback when the variable is not set
    pub prompt: PromptStrategy,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_TOKEN_ENV_VAR.to_string(),
            prompt: PromptStrategy::default(),
        }
    }
}

impl TokenConfig {
    /// Create a config with the default variable and masked prompting
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the token from a different environment variable
    #[must_use]
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    /// Set the prompt strategy
    #[must_use]
    pub fn prompt(mut self, strategy: PromptStrategy) -> Self {
        self.prompt = strategy;
        self
    }

    /// Never prompt; fail when the variable is missing
    #[must_use]
    pub fn no_prompt(self) -> Self {
        self.prompt(PromptStrategy::Disabled)
    }
}
