//! Token resolution
//!
//! Looks the token up in the environment first, then falls back to the
//! configured prompt strategy.

use super::types::{
    MaskedPrompt, NotionToken, PromptStrategy, TokenConfig, TokenPrompt, TOKEN_PROMPT,
};
use crate::error::{Error, Result};
use tracing::debug;

/// Resolve a Notion token from the process environment or a prompt
pub fn get_notion_token(config: &TokenConfig) -> Result<NotionToken> {
    resolve_token_with(config, |name| std::env::var(name).ok())
}

/// Resolve a Notion token using `lookup` in place of the process environment
pub fn resolve_token_with<F>(config: &TokenConfig, lookup: F) -> Result<NotionToken>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(&config.env_var) {
        let token = NotionToken::new(value);
        if !token.is_empty() {
            debug!("Using Notion token from ${}", config.env_var);
            return Ok(token);
        }
    }

    let entered = match &config.prompt {
        PromptStrategy::Disabled => {
            return Err(Error::MissingToken {
                env_var: config.env_var.clone(),
            })
        }
        PromptStrategy::Masked => MaskedPrompt.prompt(TOKEN_PROMPT)?,
        PromptStrategy::Custom(prompt) => prompt.prompt(TOKEN_PROMPT)?,
    };

    let token = NotionToken::new(entered);
    if token.is_empty() {
        return Err(Error::MissingToken {
            env_var: config.env_var.clone(),
        });
    }
    Ok(token)
}
