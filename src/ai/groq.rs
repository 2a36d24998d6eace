use super::{ChatError, ChatResult, LLMBackend, Model};
use crate::types::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub struct GroqBackend {
    client: Client,
    endpoint: String,
    model: Model,
    api_key: String,
}

impl GroqBackend {
    pub fn new(endpoint: String, model: Model, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
        }
    }
}

#[derive(serde::Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Deserialize)]
struct OpenAIShape {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct ContentOnly {
    content: String,
}

/// Pull the reply text out of a successful response body.
/// OpenAI shape first, then `{ content }`, then the raw body.
pub fn parse_completion_body(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<OpenAIShape>(body)
        && let Some(choice) = parsed.choices.into_iter().next()
        && let Some(msg) = choice.message
    {
        return msg.content;
    }

    if let Ok(parsed) = serde_json::from_str::<ContentOnly>(body) {
        return parsed.content;
    }

    body.to_string()
}

#[async_trait]
impl LLMBackend for GroqBackend {
    async fn complete(&self, messages: &[ChatMessage]) -> ChatResult<String> {
        tracing::debug!(model = %self.model, turns = messages.len(), "requesting completion");
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: self.model.id(),
                messages,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, bytes = body.len(), "completion response");

        if status.is_success() {
            Ok(parse_completion_body(&body))
        } else {
            Err(ChatError::new(format!("Groq error {status}: {body}")))
        }
    }

    fn describe(&self) -> String {
        format!("Groq ({})", self.model)
    }
}
