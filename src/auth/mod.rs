//! Token acquisition module
//!
//! Resolves the Notion integration token from an environment variable,
//! falling back to an interactive prompt. The prompt is configurable so
//! non-interactive callers can disable it or supply their own.

mod token;
mod types;

pub use token::{get_notion_token, resolve_token_with};
pub use types::{
    MaskedPrompt, NotionToken, PromptStrategy, TokenConfig, TokenPrompt, DEFAULT_TOKEN_ENV_VAR,
    TOKEN_PROMPT,
};
