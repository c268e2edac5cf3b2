//! Display-string resolution for localizable fields.
//!
//! Two fallback rules apply and they differ on purpose:
//! - a [`MultilingualText`] falls back to its `en` entry;
//! - an item translation falls back to the item's own base field, never to
//!   another language.

use crate::types::item::ContentItem;
use crate::types::language::LanguageCode;
use crate::types::text::MultilingualText;

/// Resolve a field for display in `lang`.
///
/// Plain text is returned unchanged for every language. A localized map
/// yields `map[lang]`, then `map[en]`, then the empty string.
pub fn resolve(field: Option<&MultilingualText>, lang: LanguageCode) -> String {
    match field {
        None => String::new(),
        Some(MultilingualText::Plain(text)) => text.clone(),
        Some(MultilingualText::Localized(map)) => [lang, LanguageCode::En]
            .iter()
            .filter_map(|l| map.get(l))
            .find(|text| !text.is_empty())
            .cloned()
            .unwrap_or_default(),
    }
}

/// Resolve an item field for display in `lang`.
///
/// Looks in `item.translations[lang][field]` first; if that is empty, uses
/// the item's base-language value. Unknown fields resolve to the empty
/// string.
pub fn resolve_item_field(item: &ContentItem, lang: LanguageCode, field: &str) -> String {
    item.translation(lang, field)
        .filter(|text| !text.is_empty())
        .or_else(|| item.fields.text_field(field))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::ItemId;
    use crate::types::item::{EventFields, ItemFields};

    #[test]
    fn test_resolve_fallbacks() {
        let en_only = MultilingualText::en("Hello");
        assert_eq!(resolve(Some(&en_only), LanguageCode::De), "Hello");

        let plain = MultilingualText::plain("Plain");
        assert_eq!(resolve(Some(&plain), LanguageCode::De), "Plain");

        let de_only = MultilingualText::en("").with(LanguageCode::De, "Hallo");
        assert_eq!(resolve(Some(&de_only), LanguageCode::De), "Hallo");
        assert_eq!(resolve(Some(&de_only), LanguageCode::Fr), "");

        assert_eq!(resolve(None, LanguageCode::En), "");
    }

    #[test]
    fn test_item_field_falls_back_to_base_value_not_english() {
        let mut item = ContentItem::draft(
            ItemId::from("e1"),
            ItemFields::Event(EventFields {
                title: "Sommerfest".into(),
                ..Default::default()
            }),
        );
        item.set_translation(LanguageCode::En, "title", "Summer party");
        item.set_translation(LanguageCode::Fr, "title", "");

        assert_eq!(resolve_item_field(&item, LanguageCode::En, "title"), "Summer party");
        // Empty French override falls back to the base field, not to `en`.
        assert_eq!(resolve_item_field(&item, LanguageCode::Fr, "title"), "Sommerfest");
        assert_eq!(resolve_item_field(&item, LanguageCode::De, "title"), "Sommerfest");
        assert_eq!(resolve_item_field(&item, LanguageCode::De, "nope"), "");
    }
}
