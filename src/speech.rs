use crate::chunk::chunk_text;
use crate::language::Language;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};

/// Longest text the speech endpoint accepts per request.
pub const MAX_TTS_CHARS: usize = 100;

const BOUNDARIES: &[&[char]] = &[
    &['.', '!', '?', ';', '\n', '।', '॥'],
    &[',', ':', '、', '，'],
    &[' ', '\t'],
];

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("no text to speak")]
    EmptyText,

    #[error("speech request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("speech service error {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("audio file error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait SpeechSynth: Send + Sync {
    /// Returns an MP3 byte stream for `text` spoken in `lang`.
    async fn synthesize(&self, text: &str, lang: Language) -> Result<Vec<u8>, SpeechError>;
}

pub struct GoogleTts {
    client: Client,
    endpoint: String,
}

impl GoogleTts {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

/// Chunks that will each be sent as one request, trimmed, blanks dropped.
pub fn speech_chunks(text: &str) -> Vec<String> {
    chunk_text(text, MAX_TTS_CHARS, BOUNDARIES)
        .into_iter()
        .map(|chunk| chunk.trim().to_string())
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

#[async_trait]
impl SpeechSynth for GoogleTts {
    async fn synthesize(&self, text: &str, lang: Language) -> Result<Vec<u8>, SpeechError> {
        let chunks = speech_chunks(text);
        if chunks.is_empty() {
            return Err(SpeechError::EmptyText);
        }
        tracing::debug!(lang = lang.code(), chunks = chunks.len(), "synthesizing speech");

        // MP3 frames are self-delimiting, so per-chunk streams concatenate cleanly.
        let mut audio = Vec::new();
        for chunk in &chunks {
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", lang.code()),
                    ("q", chunk.as_str()),
                ])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(SpeechError::Status { status, body });
            }
            audio.extend_from_slice(&response.bytes().await?);
        }
        Ok(audio)
    }
}

pub async fn save_audio(path: &Path, audio: &[u8]) -> Result<PathBuf, SpeechError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, audio).await?;
    tracing::info!(path = %path.display(), bytes = audio.len(), "saved speech");
    Ok(path.to_path_buf())
}

/// Run the configured player on the saved file and wait for it to exit.
pub async fn play_audio(player: &str, path: &Path) -> Result<(), SpeechError> {
    let mut parts = player.split_whitespace();
    let Some(program) = parts.next() else {
        return Ok(());
    };
    let status = tokio::process::Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .await?;
    if !status.success() {
        tracing::warn!(%status, player, "audio player exited with failure");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_long_text_on_sentences() {
        let sentence = "Drink plenty of fluids and rest for a few days. ";
        let text = sentence.repeat(5);
        let chunks = speech_chunks(&text);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_TTS_CHARS));
        assert!(chunks.iter().all(|c| c.ends_with('.')));
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(speech_chunks("  \n ").is_empty());
    }

    #[tokio::test]
    async fn empty_text_is_rejected_without_request() {
        let tts = GoogleTts::new("http://127.0.0.1:9/unused");
        let result = tts.synthesize("   ", Language::English).await;
        assert!(matches!(result, Err(SpeechError::EmptyText)));
    }
}
