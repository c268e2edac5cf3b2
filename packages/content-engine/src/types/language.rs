//! Supported editor languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language code for localizable fields.
///
/// `En` is the authoritative source language for AI-assisted translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    De,
    Fr,
    Es,
}

impl LanguageCode {
    /// All supported languages, source language first.
    pub const ALL: [LanguageCode; 4] = [
        LanguageCode::En,
        LanguageCode::De,
        LanguageCode::Fr,
        LanguageCode::Es,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::De => "de",
            LanguageCode::Fr => "fr",
            LanguageCode::Es => "es",
        }
    }

    /// Returns `true` for the translation source language.
    pub fn is_source(&self) -> bool {
        matches!(self, LanguageCode::En)
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::En
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unsupported language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for LanguageCode {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(LanguageCode::En),
            "de" => Ok(LanguageCode::De),
            "fr" => Ok(LanguageCode::Fr),
            "es" => Ok(LanguageCode::Es),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}
