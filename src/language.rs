use std::fmt;
use std::str::FromStr;

/// Reply languages offered to the user. English is the model's native output
/// and never goes through the translator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    English,
    Tamil,
    Hindi,
    Malayalam,
    Kannada,
    Telugu,
    Marathi,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::English,
        Language::Tamil,
        Language::Hindi,
        Language::Malayalam,
        Language::Kannada,
        Language::Telugu,
        Language::Marathi,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Tamil => "Tamil",
            Language::Hindi => "Hindi",
            Language::Malayalam => "Malayalam",
            Language::Kannada => "Kannada",
            Language::Telugu => "Telugu",
            Language::Marathi => "Marathi",
        }
    }

    /// Two-letter code understood by the translation and speech services.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Tamil => "ta",
            Language::Hindi => "hi",
            Language::Malayalam => "ml",
            Language::Kannada => "kn",
            Language::Telugu => "te",
            Language::Marathi => "mr",
        }
    }

    pub fn is_default(self) -> bool {
        self == Language::default()
    }
}

/// Exact display-name lookup. Anything outside the seven names has no code.
pub fn language_code(name: &str) -> Option<&'static str> {
    Language::ALL
        .iter()
        .find(|lang| lang.name() == name)
        .map(|lang| lang.code())
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown language '{0}' (expected one of: English, Tamil, Hindi, Malayalam, Kannada, Telugu, Marathi)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| {
                lang.name().eq_ignore_ascii_case(wanted) || lang.code().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownLanguage(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_language_to_its_code() {
        let expected = [
            ("English", "en"),
            ("Tamil", "ta"),
            ("Hindi", "hi"),
            ("Malayalam", "ml"),
            ("Kannada", "kn"),
            ("Telugu", "te"),
            ("Marathi", "mr"),
        ];
        for (name, code) in expected {
            assert_eq!(language_code(name), Some(code), "{name}");
        }
    }

    #[test]
    fn lookup_is_undefined_for_other_keys() {
        assert_eq!(language_code("French"), None);
        assert_eq!(language_code("tamil"), None);
        assert_eq!(language_code(""), None);
    }

    #[test]
    fn parses_names_and_codes() {
        assert_eq!("tamil".parse::<Language>().unwrap(), Language::Tamil);
        assert_eq!("HI".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!(" Marathi ".parse::<Language>().unwrap(), Language::Marathi);
        assert!("Klingon".parse::<Language>().is_err());
    }

    #[test]
    fn only_english_is_default() {
        assert!(Language::English.is_default());
        assert!(
            Language::ALL
                .iter()
                .filter(|lang| lang.is_default())
                .count()
                == 1
        );
    }
}
