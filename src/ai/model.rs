use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Model {
    #[default]
    Gemma2_9b,
    Llama3_8b,
}

impl Model {
    pub const ALL: [Model; 2] = [Model::Gemma2_9b, Model::Llama3_8b];

    /// Identifier sent verbatim to the provider.
    pub fn id(self) -> &'static str {
        match self {
            Model::Gemma2_9b => "Gemma2-9b-It",
            Model::Llama3_8b => "llama3-8b-8192",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown model '{0}' (expected Gemma2-9b-It or llama3-8b-8192)")]
pub struct UnknownModel(pub String);

impl FromStr for Model {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Model::ALL
            .into_iter()
            .find(|model| model.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownModel(wanted.to_string()))
    }
}
