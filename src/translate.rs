use crate::chunk::chunk_text;
use crate::language::Language;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// The provider rejects payloads of this many characters or more.
pub const MAX_TRANSLATE_CHARS: usize = 4999;

const BOUNDARIES: &[&[char]] = &[&['\n'], &[' ', '\t']];

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation service error {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected translation response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from an auto-detected source into `target`.
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError>;
}

pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    async fn translate_chunk(&self, chunk: &str, target: Language) -> Result<String, TranslateError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", chunk),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TranslateError::Status { status, body });
        }
        parse_translation(&body)
    }
}

/// The response is `[[["translated", "source", ...], ...], ...]`; the
/// translation is every segment's first element joined together.
pub fn parse_translation(body: &str) -> Result<String, TranslateError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| TranslateError::Malformed(e.to_string()))?;
    let segments = value
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| TranslateError::Malformed("missing segment list".to_string()))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|s| s.as_str()))
        .collect())
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let chunks = chunk_text(text, MAX_TRANSLATE_CHARS, BOUNDARIES);
        tracing::debug!(target = target.code(), chunks = chunks.len(), "translating reply");

        let mut translated = String::with_capacity(text.len());
        for chunk in &chunks {
            if chunk.trim().is_empty() {
                translated.push_str(chunk);
                continue;
            }
            translated.push_str(&self.translate_chunk(chunk, target).await?);
        }
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_all_segments() {
        let body = r#"[[["வணக்கம் ","Hello ",null,null,10],["உலகம்","world",null,null,10]],null,"en"]"#;
        assert_eq!(parse_translation(body).unwrap(), "வணக்கம் உலகம்");
    }

    #[test]
    fn rejects_unexpected_shape() {
        assert!(matches!(
            parse_translation(r#"{"error":"nope"}"#),
            Err(TranslateError::Malformed(_))
        ));
        assert!(matches!(
            parse_translation("<html>"),
            Err(TranslateError::Malformed(_))
        ));
    }
}
