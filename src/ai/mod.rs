//! Chat-completion backends for the consultant.
//!
//! - `groq` - hosted Groq API (OpenAI-compatible chat completions)
//! - `custom` - any endpoint accepting `{ messages }` and returning `{ content }`
//!
//! `backend_from_settings` picks one; `None` means no API key is available.
mod custom;
mod groq;
mod model;

pub use custom::CustomBackend;
pub use groq::{GroqBackend, parse_completion_body};
pub use model::{Model, UnknownModel};

use crate::config::Settings;
use crate::types::ChatMessage;
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone)]
pub struct ChatError(String);

impl ChatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ChatError {}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::new(err.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::new(err.to_string())
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

#[async_trait]
pub trait LLMBackend: Send + Sync {
    /// Single synchronous completion for the given conversation.
    async fn complete(&self, messages: &[ChatMessage]) -> ChatResult<String>;

    fn describe(&self) -> String;
}

pub fn backend_from_settings(settings: &Settings) -> Option<Box<dyn LLMBackend>> {
    if let Some(endpoint) = &settings.llm_endpoint {
        return Some(Box::new(CustomBackend::new(endpoint.clone())));
    }

    let api_key = settings.api_key.as_deref().filter(|key| !key.trim().is_empty())?;
    Some(Box::new(GroqBackend::new(
        settings.groq_url.clone(),
        settings.model,
        api_key.to_string(),
    )))
}
