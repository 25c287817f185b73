use crate::error::TranslationError;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Target languages accepted by `/translate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[strum(serialize = "BG")]
    Bulgarian,
    #[strum(serialize = "CS")]
    Czech,
    #[strum(serialize = "DA")]
    Danish,
    #[strum(serialize = "DE")]
    German,
    #[strum(serialize = "EL")]
    Greek,
    #[strum(serialize = "EN-GB")]
    EnglishBritish,
    #[strum(serialize = "EN-US")]
    EnglishAmerican,
    #[strum(serialize = "ES")]
    Spanish,
    #[strum(serialize = "ET")]
    Estonian,
    #[strum(serialize = "FI")]
    Finnish,
    #[strum(serialize = "FR")]
    French,
    #[strum(serialize = "HU")]
    Hungarian,
    #[strum(serialize = "ID")]
    Indonesian,
    #[strum(serialize = "IT")]
    Italian,
    #[strum(serialize = "JA")]
    Japanese,
    #[strum(serialize = "KO")]
    Korean,
    #[strum(serialize = "LT")]
    Lithuanian,
    #[strum(serialize = "LV")]
    Latvian,
    #[strum(serialize = "NB")]
    Norwegian,
    #[strum(serialize = "NL")]
    Dutch,
    #[strum(serialize = "PL")]
    Polish,
    #[strum(serialize = "PT-BR")]
    PortugueseBrazilian,
    #[strum(serialize = "PT-PT")]
    Portuguese,
    #[strum(serialize = "RO")]
    Romanian,
    #[strum(serialize = "RU")]
    Russian,
    #[strum(serialize = "SK")]
    Slovak,
    #[strum(serialize = "SL")]
    Slovenian,
    #[strum(serialize = "SV")]
    Swedish,
    #[strum(serialize = "TR")]
    Turkish,
    #[strum(serialize = "UK")]
    Ukrainian,
    #[strum(serialize = "ZH")]
    Chinese,
}

impl Language {
    /// The language every prompt is translated into before it reaches the backend.
    pub const BACKEND: Self = Self::EnglishAmerican;

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Bulgarian => "Bulgarian",
            Self::Czech => "Czech",
            Self::Danish => "Danish",
            Self::German => "German",
            Self::Greek => "Greek",
            Self::EnglishBritish => "English (British)",
            Self::EnglishAmerican => "English (American)",
            Self::Spanish => "Spanish",
            Self::Estonian => "Estonian",
            Self::Finnish => "Finnish",
            Self::French => "French",
            Self::Hungarian => "Hungarian",
            Self::Indonesian => "Indonesian",
            Self::Italian => "Italian",
            Self::Japanese => "Japanese",
            Self::Korean => "Korean",
            Self::Lithuanian => "Lithuanian",
            Self::Latvian => "Latvian",
            Self::Norwegian => "Norwegian (Bokmål)",
            Self::Dutch => "Dutch",
            Self::Polish => "Polish",
            Self::PortugueseBrazilian => "Portuguese (Brazilian)",
            Self::Portuguese => "Portuguese (all other Portuguese varieties)",
            Self::Romanian => "Romanian",
            Self::Russian => "Russian",
            Self::Slovak => "Slovak",
            Self::Slovenian => "Slovenian",
            Self::Swedish => "Swedish",
            Self::Turkish => "Turkish",
            Self::Ukrainian => "Ukrainian",
            Self::Chinese => "Chinese (simplified)",
        }
    }

    pub fn parse_code(code: &str) -> Result<Self, TranslationError> {
        Self::from_str(code.trim())
            .map_err(|_| TranslationError::UnsupportedLanguage(code.trim().to_string()))
    }

    /// Map a speech-recognition language tag (e.g. "en", "pt") to a target language.
    pub fn from_detected(tag: &str) -> Result<Self, TranslationError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Self::EnglishAmerican),
            "pt" => Ok(Self::Portuguese),
            other => Self::parse_code(other),
        }
    }
}

/// One `CODE - Name` line per supported language.
pub fn language_list() -> String {
    Language::iter()
        .map(|lang| format!("{lang} - {}", lang.display_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serde adapter storing an optional [`Language`] as its code string.
pub mod serde_code {
    use super::Language;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(lang: &Option<Language>, s: S) -> Result<S::Ok, S::Error> {
        match lang {
            Some(lang) => s.serialize_some(&lang.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Language>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|code| Language::parse_code(&code).map_err(serde::de::Error::custom))
            .transpose()
    }
}
