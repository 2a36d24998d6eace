use super::{ChatError, ChatResult, LLMBackend, parse_completion_body};
use crate::types::ChatMessage;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Self-hosted chat endpoint set through `LLM_ENDPOINT`. No key, no model field;
/// whatever sits behind the URL decides both.
pub struct CustomBackend {
    client: Client,
    endpoint: String,
}

impl CustomBackend {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[derive(Serialize)]
struct CustomRequest<'a> {
    messages: &'a [ChatMessage],
}

#[async_trait]
impl LLMBackend for CustomBackend {
    async fn complete(&self, messages: &[ChatMessage]) -> ChatResult<String> {
        tracing::debug!(endpoint = %self.endpoint, turns = messages.len(), "requesting completion");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&CustomRequest { messages })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, bytes = body.len(), "completion response");

        if !status.is_success() {
            return Err(ChatError::new(format!("Custom endpoint error {status}: {body}")));
        }
        Ok(parse_completion_body(&body))
    }

    fn describe(&self) -> String {
        format!("custom endpoint {}", self.endpoint)
    }
}
