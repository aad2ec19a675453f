//! Locale definitions
//!
//! The active locale drives two things: which language results are
//! translated into, and which language tag a dictation session is opened
//! with. English is the default locale; results are only translated when
//! the active locale differs from it.

use serde::{Deserialize, Serialize};

/// Supported display/spoken languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Portuguese,
    Italian,
    Hindi,
    Arabic,
    Chinese,
    Japanese,
}

impl Language {
    /// Get ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Portuguese => "pt",
            Self::Italian => "it",
            Self::Hindi => "hi",
            Self::Arabic => "ar",
            Self::Chinese => "zh",
            Self::Japanese => "ja",
        }
    }

    /// Get the English display name, used as the translation target in prompts
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Portuguese => "Portuguese",
            Self::Italian => "Italian",
            Self::Hindi => "Hindi",
            Self::Arabic => "Arabic",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
        }
    }

    /// Get the BCP-47 tag used for dictation sessions
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::Spanish => "es-ES",
            Self::French => "fr-FR",
            Self::German => "de-DE",
            Self::Portuguese => "pt-BR",
            Self::Italian => "it-IT",
            Self::Hindi => "hi-IN",
            Self::Arabic => "ar-SA",
            Self::Chinese => "zh-CN",
            Self::Japanese => "ja-JP",
        }
    }

    /// True for the default locale (results are shown untranslated)
    pub fn is_default(&self) -> bool {
        matches!(self, Self::English)
    }

    /// Parse from string (case-insensitive, accepts codes and names)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "en" | "eng" | "english" => Some(Self::English),
            "es" | "spa" | "spanish" => Some(Self::Spanish),
            "fr" | "fra" | "french" => Some(Self::French),
            "de" | "deu" | "ger" | "german" => Some(Self::German),
            "pt" | "por" | "portuguese" => Some(Self::Portuguese),
            "it" | "ita" | "italian" => Some(Self::Italian),
            "hi" | "hin" | "hindi" => Some(Self::Hindi),
            "ar" | "ara" | "arabic" => Some(Self::Arabic),
            "zh" | "zho" | "chinese" | "mandarin" => Some(Self::Chinese),
            "ja" | "jpn" | "japanese" => Some(Self::Japanese),
            _ => None,
        }
    }

    /// Get all supported languages
    pub fn all() -> &'static [Language] {
        &[
            Self::English,
            Self::Spanish,
            Self::French,
            Self::German,
            Self::Portuguese,
            Self::Italian,
            Self::Hindi,
            Self::Arabic,
            Self::Chinese,
            Self::Japanese,
        ]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
