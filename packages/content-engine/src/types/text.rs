//! Field values that may vary per language.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::language::LanguageCode;

/// A localizable field value.
///
/// Legacy data stores a bare string that is shown unchanged in every
/// language; newer data stores one entry per language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultilingualText {
    Plain(String),
    Localized(BTreeMap<LanguageCode, String>),
}

impl MultilingualText {
    /// Language-invariant text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Localized text with only the source language set.
    pub fn en(text: impl Into<String>) -> Self {
        Self::Localized(BTreeMap::from([(LanguageCode::En, text.into())]))
    }

    /// Add or replace one language entry.
    ///
    /// A plain value is upgraded to a localized map, keeping the original
    /// string as its `en` entry.
    pub fn with(mut self, lang: LanguageCode, text: impl Into<String>) -> Self {
        self.set(lang, text);
        self
    }

    pub fn set(&mut self, lang: LanguageCode, text: impl Into<String>) {
        let text = text.into();
        match self {
            MultilingualText::Localized(map) => {
                map.insert(lang, text);
            }
            MultilingualText::Plain(existing) => {
                let mut map = BTreeMap::new();
                map.insert(LanguageCode::En, std::mem::take(existing));
                map.insert(lang, text);
                *self = MultilingualText::Localized(map);
            }
        }
    }

    /// The raw entry for `lang`, without fallback. Plain text answers for
    /// every language.
    pub fn get(&self, lang: LanguageCode) -> Option<&str> {
        match self {
            MultilingualText::Plain(text) => Some(text),
            MultilingualText::Localized(map) => map.get(&lang).map(String::as_str),
        }
    }

    /// Non-empty source text to translate from.
    pub fn source_text(&self) -> Option<&str> {
        self.get(LanguageCode::En).filter(|s| !s.trim().is_empty())
    }

    /// Returns `true` when `lang` has its own non-empty entry.
    pub fn has_translation(&self, lang: LanguageCode) -> bool {
        match self {
            MultilingualText::Plain(_) => false,
            MultilingualText::Localized(map) => {
                map.get(&lang).is_some_and(|s| !s.trim().is_empty())
            }
        }
    }
}

impl Default for MultilingualText {
    fn default() -> Self {
        Self::Localized(BTreeMap::new())
    }
}

impl From<&str> for MultilingualText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for MultilingualText {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_both_shapes() {
        let plain: MultilingualText = serde_json::from_str("\"Welcome\"").unwrap();
        assert_eq!(plain, MultilingualText::plain("Welcome"));

        let map: MultilingualText =
            serde_json::from_str(r#"{"en":"Welcome","de":"Willkommen"}"#).unwrap();
        assert_eq!(map.get(LanguageCode::De), Some("Willkommen"));
    }

    #[test]
    fn test_set_upgrades_plain_text() {
        let mut text = MultilingualText::plain("Welcome");
        text.set(LanguageCode::Fr, "Bienvenue");

        assert_eq!(text.get(LanguageCode::En), Some("Welcome"));
        assert_eq!(text.get(LanguageCode::Fr), Some("Bienvenue"));
        assert!(text.has_translation(LanguageCode::Fr));
        assert!(!text.has_translation(LanguageCode::De));
    }
}
