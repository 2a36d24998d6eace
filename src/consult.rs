use crate::ai::{ChatError, LLMBackend, Model, backend_from_settings};
use crate::config::Settings;
use crate::language::Language;
use crate::prompt::PromptTemplate;
use crate::session::Session;
use crate::speech::{GoogleTts, SpeechError, SpeechSynth, save_audio};
use crate::translate::{GoogleTranslator, TranslateError, Translator};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConsultError {
    #[error("Please describe your symptoms first.")]
    EmptyInput,

    #[error("Please enter your GROQ API key to continue.")]
    MissingApiKey,

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error(transparent)]
    Speech(#[from] SpeechError),
}

/// Runs one consultation turn: prompt, completion, optional translation.
pub struct Consultant {
    settings: Settings,
    backend: Option<Box<dyn LLMBackend>>,
    translator: Box<dyn Translator>,
    speech: Box<dyn SpeechSynth>,
    prompt: PromptTemplate,
}

impl Consultant {
    pub fn from_settings(settings: Settings) -> Self {
        let translator = Box::new(GoogleTranslator::new(settings.translate_url.clone()));
        let speech = Box::new(GoogleTts::new(settings.tts_url.clone()));
        let backend = backend_from_settings(&settings);
        Self::new(settings, backend, translator, speech)
    }

    pub fn new(
        settings: Settings,
        backend: Option<Box<dyn LLMBackend>>,
        translator: Box<dyn Translator>,
        speech: Box<dyn SpeechSynth>,
    ) -> Self {
        Self {
            settings,
            backend,
            translator,
            speech,
            prompt: PromptTemplate,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn backend_description(&self) -> Option<String> {
        self.backend.as_ref().map(|backend| backend.describe())
    }

    pub fn set_model(&mut self, model: Model) {
        self.settings.model = model;
        self.rebuild_backend();
    }

    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        let key = api_key.into();
        self.settings.api_key = Some(key).filter(|k| !k.trim().is_empty());
        self.rebuild_backend();
    }

    fn rebuild_backend(&mut self) {
        self.backend = backend_from_settings(&self.settings);
    }

    /// Record the user's turn, consult the model and record the reply.
    ///
    /// The user turn is kept even when the consultation fails; the
    /// assistant turn is only appended on success.
    pub async fn ask(&self, session: &mut Session, input: &str) -> Result<String, ConsultError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ConsultError::EmptyInput);
        }
        session.push_user(input);

        let Some(backend) = self.backend.as_ref() else {
            return Err(ConsultError::MissingApiKey);
        };

        let messages = self.prompt.format(input, input);
        tracing::trace!(prompt = %self.prompt.render(input, input), "assembled prompt");

        let mut reply = backend.complete(&messages).await?;

        let language = self.settings.language;
        if language.is_default() {
            tracing::debug!("reply language is default, skipping translation");
        } else {
            reply = self.translator.translate(&reply, language).await?;
        }

        session.push_assistant(reply.clone());
        Ok(reply)
    }

    /// Synthesize `text` in the selected language and save it to the audio path.
    pub async fn speak(&self, text: &str) -> Result<PathBuf, ConsultError> {
        let audio = self.speech.synthesize(text, self.settings.language).await?;
        Ok(save_audio(&self.settings.audio_path, &audio).await?)
    }
}
