//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::env;

use super::language::LanguageCode;
use crate::error::ConfigError;

/// Configuration for a [`SiteEditor`](crate::SiteEditor) session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Language the editor previews in when none is requested.
    ///
    /// Default: `en`.
    pub default_language: LanguageCode,

    /// Languages the site is published in. Translation suggestions target
    /// every entry except the source language.
    ///
    /// Default: all supported languages.
    pub languages: Vec<LanguageCode>,

    /// Replace existing translations when suggesting new ones.
    ///
    /// Default: false (only empty fields are filled).
    pub overwrite_translations: bool,

    /// Attempts to re-persist original containers when an item delete fails
    /// after its tag purge was already saved.
    ///
    /// Default: 2.
    pub compensation_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_language: LanguageCode::En,
            languages: LanguageCode::ALL.to_vec(),
            overwrite_translations: false,
            compensation_retries: 2,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Reads `SITE_DEFAULT_LANGUAGE`, `SITE_LANGUAGES` (comma separated),
    /// `SITE_OVERWRITE_TRANSLATIONS` and `SITE_COMPENSATION_RETRIES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(raw) = env::var("SITE_DEFAULT_LANGUAGE") {
            config.default_language = raw.parse().map_err(|e| ConfigError::Invalid {
                key: "SITE_DEFAULT_LANGUAGE",
                reason: format!("{e}"),
            })?;
        }

        if let Ok(raw) = env::var("SITE_LANGUAGES") {
            config.languages = parse_languages(&raw)?;
        }

        if let Ok(raw) = env::var("SITE_OVERWRITE_TRANSLATIONS") {
            config.overwrite_translations =
                raw.parse().map_err(|_| ConfigError::Invalid {
                    key: "SITE_OVERWRITE_TRANSLATIONS",
                    reason: format!("expected true or false, got {raw:?}"),
                })?;
        }

        if let Ok(raw) = env::var("SITE_COMPENSATION_RETRIES") {
            config.compensation_retries = raw.parse().map_err(|_| ConfigError::Invalid {
                key: "SITE_COMPENSATION_RETRIES",
                reason: format!("expected a non-negative integer, got {raw:?}"),
            })?;
        }

        Ok(config)
    }

    pub fn with_default_language(mut self, lang: LanguageCode) -> Self {
        self.default_language = lang;
        self
    }

    pub fn with_languages(mut self, languages: impl IntoIterator<Item = LanguageCode>) -> Self {
        self.languages = languages.into_iter().collect();
        self
    }

    pub fn with_overwrite_translations(mut self, overwrite: bool) -> Self {
        self.overwrite_translations = overwrite;
        self
    }

    pub fn with_compensation_retries(mut self, retries: u32) -> Self {
        self.compensation_retries = retries;
        self
    }

    /// Languages translation suggestions should fill.
    pub fn target_languages(&self) -> impl Iterator<Item = LanguageCode> + '_ {
        self.languages.iter().copied().filter(|l| !l.is_source())
    }
}

fn parse_languages(raw: &str) -> Result<Vec<LanguageCode>, ConfigError> {
    let mut languages = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let lang: LanguageCode = part.parse().map_err(|e| ConfigError::Invalid {
            key: "SITE_LANGUAGES",
            reason: format!("{e}"),
        })?;
        if !languages.contains(&lang) {
            languages.push(lang);
        }
    }
    if languages.is_empty() {
        return Err(ConfigError::Invalid {
            key: "SITE_LANGUAGES",
            reason: "at least one language is required".to_string(),
        });
    }
    Ok(languages)
}
