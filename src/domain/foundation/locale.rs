//! Locale value object - the language replies are rendered in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Supported reply languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Hi,
    Pa,
    Ml,
    Ta,
}

impl Locale {
    /// All locales, in the order they are offered to users.
    pub const ALL: [Locale; 5] = [Locale::En, Locale::Hi, Locale::Pa, Locale::Ml, Locale::Ta];

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Hi => "hi",
            Locale::Pa => "pa",
            Locale::Ml => "ml",
            Locale::Ta => "ta",
        }
    }

    /// Name of the language written in its own script.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Hi => "हिंदी",
            Locale::Pa => "ਪੰਜਾਬੀ",
            Locale::Ml => "മലയാളം",
            Locale::Ta => "தமிழ்",
        }
    }

    /// Name of the language in English.
    pub fn english_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Hi => "Hindi",
            Locale::Pa => "Punjabi",
            Locale::Ml => "Malayalam",
            Locale::Ta => "Tamil",
        }
    }

    /// Whether message tables exist for this locale.
    ///
    /// Other locales are composed in English and translated on the way out.
    pub fn has_native_catalog(&self) -> bool {
        matches!(self, Locale::En | Locale::Hi)
    }

    /// Matches a free-text language answer against known names.
    ///
    /// Accepts the ISO code, the English name or the native-script name,
    /// ignoring case and surrounding whitespace. Anything else is rejected;
    /// there is no fallback language.
    pub fn from_answer(raw: &str) -> Result<Self, ValidationError> {
        let answer = raw.trim().to_lowercase();
        if answer.is_empty() {
            return Err(ValidationError::empty_field("language"));
        }
        Locale::ALL
            .iter()
            .copied()
            .find(|locale| {
                answer == locale.code()
                    || answer == locale.english_name().to_lowercase()
                    || answer == locale.native_name().to_lowercase()
                    || answer.contains(&locale.english_name().to_lowercase())
                    || answer.contains(locale.native_name())
            })
            .ok_or_else(|| ValidationError::UnknownOption {
                field: "language".to_string(),
                raw: raw.trim().to_string(),
            })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .iter()
            .copied()
            .find(|locale| locale.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownOption {
                field: "locale".to_string(),
                raw: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_codes() {
        assert_eq!("hi".parse::<Locale>().unwrap(), Locale::Hi);
        assert_eq!("TA".parse::<Locale>().unwrap(), Locale::Ta);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn answer_matches_english_and_native_names() {
        assert_eq!(Locale::from_answer("English").unwrap(), Locale::En);
        assert_eq!(Locale::from_answer("  hindi ").unwrap(), Locale::Hi);
        assert_eq!(Locale::from_answer("हिंदी").unwrap(), Locale::Hi);
        assert_eq!(Locale::from_answer("ਪੰਜਾਬੀ").unwrap(), Locale::Pa);
        assert_eq!(Locale::from_answer("Punjabi").unwrap(), Locale::Pa);
        assert_eq!(Locale::from_answer("മലയാളം").unwrap(), Locale::Ml);
        assert_eq!(Locale::from_answer("தமிழ்").unwrap(), Locale::Ta);
    }

    #[test]
    fn answer_matches_keyboard_button_labels() {
        assert_eq!(Locale::from_answer("हिंदी (Hindi)").unwrap(), Locale::Hi);
        assert_eq!(Locale::from_answer("தமிழ் (Tamil)").unwrap(), Locale::Ta);
    }

    #[test]
    fn unknown_language_is_rejected_not_defaulted() {
        match Locale::from_answer("Klingon") {
            Err(ValidationError::UnknownOption { field, raw }) => {
                assert_eq!(field, "language");
                assert_eq!(raw, "Klingon");
            }
            other => panic!("expected UnknownOption, got {:?}", other),
        }
    }

    #[test]
    fn blank_language_is_empty_field() {
        assert!(matches!(
            Locale::from_answer("  "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn only_english_and_hindi_have_native_catalogs() {
        let native: Vec<_> = Locale::ALL
            .iter()
            .filter(|l| l.has_native_catalog())
            .collect();
        assert_eq!(native, vec![&Locale::En, &Locale::Hi]);
    }

    #[test]
    fn serializes_as_lowercase_code() {
        assert_eq!(serde_json::to_string(&Locale::Ml).unwrap(), "\"ml\"");
    }
}
