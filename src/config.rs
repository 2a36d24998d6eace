use crate::ai::Model;
use crate::language::Language;
use crate::session::HistoryOrder;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_TTS_URL: &str = "https://translate.google.com/translate_tts";
pub const DEFAULT_AUDIO_PATH: &str = "response_audio.mp3";

/// CLI arguments for medconsult
#[derive(Parser, Debug)]
#[command(name = "medconsult")]
#[command(about = "Multilingual medical consultant chatbot")]
#[command(version)]
pub struct Cli {
    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model used for completions (Gemma2-9b-It, llama3-8b-8192)
    #[arg(long, env = "MEDCONSULT_MODEL", default_value_t = Model::default())]
    pub model: Model,

    /// Reply language (English, Tamil, Hindi, Malayalam, Kannada, Telugu, Marathi)
    #[arg(long, env = "MEDCONSULT_LANGUAGE", default_value_t = Language::default())]
    pub language: Language,

    /// Self-hosted chat endpoint; takes priority over Groq and needs no key
    #[arg(long, env = "LLM_ENDPOINT", value_name = "URL")]
    pub llm_endpoint: Option<String>,

    /// Override the Groq chat-completions URL
    #[arg(long, env = "GROQ_API_URL", value_name = "URL", default_value = DEFAULT_GROQ_URL)]
    pub groq_url: String,

    /// Override the translation endpoint
    #[arg(long, env = "TRANSLATE_URL", value_name = "URL", default_value = DEFAULT_TRANSLATE_URL)]
    pub translate_url: String,

    /// Override the text-to-speech endpoint
    #[arg(long, env = "TTS_URL", value_name = "URL", default_value = DEFAULT_TTS_URL)]
    pub tts_url: String,

    /// Where synthesized speech is written
    #[arg(long, value_name = "PATH", default_value = DEFAULT_AUDIO_PATH)]
    pub audio_path: PathBuf,

    /// Command used to play synthesized speech (e.g. mpv, afplay)
    #[arg(long, env = "AUDIO_PLAYER", value_name = "CMD")]
    pub player: Option<String>,

    /// Show chat history newest first
    #[arg(long)]
    pub newest_first: bool,

    /// Ask a single question and exit instead of starting the REPL
    #[arg(long, value_name = "TEXT")]
    pub ask: Option<String>,
}

/// Resolved configuration, passed explicitly to the consultant and REPL.
#[derive(Clone, Debug)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model: Model,
    pub language: Language,
    pub llm_endpoint: Option<String>,
    pub groq_url: String,
    pub translate_url: String,
    pub tts_url: String,
    pub audio_path: PathBuf,
    pub player: Option<String>,
    pub history_order: HistoryOrder,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: Model::default(),
            language: Language::default(),
            llm_endpoint: None,
            groq_url: DEFAULT_GROQ_URL.to_string(),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            tts_url: DEFAULT_TTS_URL.to_string(),
            audio_path: PathBuf::from(DEFAULT_AUDIO_PATH),
            player: None,
            history_order: HistoryOrder::default(),
        }
    }
}

impl Settings {
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl From<&Cli> for Settings {
    fn from(cli: &Cli) -> Self {
        Self {
            api_key: cli.api_key.clone().filter(|key| !key.trim().is_empty()),
            model: cli.model,
            language: cli.language,
            llm_endpoint: cli.llm_endpoint.clone().filter(|url| !url.trim().is_empty()),
            groq_url: cli.groq_url.clone(),
            translate_url: cli.translate_url.clone(),
            tts_url: cli.tts_url.clone(),
            audio_path: cli.audio_path.clone(),
            player: cli.player.clone().filter(|cmd| !cmd.trim().is_empty()),
            history_order: if cli.newest_first {
                HistoryOrder::NewestFirst
            } else {
                HistoryOrder::Chronological
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_into_settings() {
        let cli = Cli::try_parse_from([
            "medconsult",
            "--api-key",
            "gsk_123",
            "--model",
            "llama3-8b-8192",
            "--language",
            "Tamil",
            "--newest-first",
        ])
        .unwrap();
        let settings = Settings::from(&cli);

        assert_eq!(settings.model, Model::Llama3_8b);
        assert_eq!(settings.language, Language::Tamil);
        assert_eq!(settings.history_order, HistoryOrder::NewestFirst);
        assert!(settings.has_api_key());
        assert_eq!(settings.audio_path, PathBuf::from("response_audio.mp3"));
    }

    #[test]
    fn rejects_unknown_model() {
        let result = Cli::try_parse_from(["medconsult", "--model", "gpt-4o"]);
        assert!(result.is_err());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let settings = Settings {
            api_key: Some(String::new()),
            ..Settings::default()
        };
        assert!(!settings.has_api_key());
    }
}
