//! Planning and applying AI translation suggestions.
//!
//! A suggestion batch is a list of (field, language) jobs. The editor runs
//! them one at a time and writes each result into the live state, so a slow
//! earlier call can never overwrite a field with a stale copy of the entity.

use serde::{Deserialize, Serialize};

use crate::error::ReferentialError;
use crate::state::SiteState;
use crate::types::id::{ContainerId, ItemId, PageId};
use crate::types::item::Collection;
use crate::types::language::LanguageCode;
use crate::types::text::MultilingualText;

/// Field name used for page titles in translation jobs.
pub const PAGE_TITLE_FIELD: &str = "title";

/// Entity whose localizable fields should be translated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationTarget {
    Item { collection: Collection, id: ItemId },
    ContainerContent(ContainerId),
    PageTitle(PageId),
}

/// One translator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    pub field: String,
    pub language: LanguageCode,
    pub source_text: String,
}

impl SiteState {
    /// Jobs needed to fill `languages` for every localizable field of
    /// `target`, in field then language order.
    ///
    /// Fields with no source text are skipped; so are languages that already
    /// have a value unless `overwrite` is set.
    pub fn translation_jobs(
        &self,
        target: &TranslationTarget,
        languages: &[LanguageCode],
        overwrite: bool,
    ) -> Result<Vec<TranslationJob>, ReferentialError> {
        let mut jobs = Vec::new();
        let mut plan = |field: &str, source: Option<&str>, has: &dyn Fn(LanguageCode) -> bool| {
            let Some(source) = source.filter(|s| !s.trim().is_empty()) else {
                return;
            };
            for &language in languages.iter().filter(|l| !l.is_source()) {
                if overwrite || !has(language) {
                    jobs.push(TranslationJob {
                        field: field.to_string(),
                        language,
                        source_text: source.to_string(),
                    });
                }
            }
        };

        match target {
            TranslationTarget::Item { collection, id } => {
                let item = self.require_item(*collection, id)?;
                for &field in item.fields.localizable_fields() {
                    let source = item
                        .translation(LanguageCode::En, field)
                        .filter(|s| !s.is_empty())
                        .or_else(|| item.fields.text_field(field));
                    plan(field, source, &|lang: LanguageCode| {
                        item.translation(lang, field).is_some_and(|s| !s.trim().is_empty())
                    });
                }
            }
            TranslationTarget::ContainerContent(container_id) => {
                let container = self.container_at(self.locate(container_id)?);
                for (field, text) in &container.content {
                    plan(field.as_str(), text.source_text(), &|lang: LanguageCode| {
                        text.has_translation(lang)
                    });
                }
            }
            TranslationTarget::PageTitle(page_id) => {
                let page = &self.pages[self.page_index(page_id)?];
                let title = &page.title;
                plan(PAGE_TITLE_FIELD, title.source_text(), &|lang: LanguageCode| {
                    title.has_translation(lang)
                });
            }
        }

        Ok(jobs)
    }

    /// Write one translated value into the current state.
    pub fn apply_translation(
        &mut self,
        target: &TranslationTarget,
        field: &str,
        language: LanguageCode,
        text: &str,
    ) -> Result<(), ReferentialError> {
        match target {
            TranslationTarget::Item { collection, id } => {
                let item = self.collections.get_mut(*collection, id).ok_or_else(|| {
                    ReferentialError::UnknownItem {
                        collection: *collection,
                        id: id.clone(),
                    }
                })?;
                item.set_translation(language, field, text);
                item.touch();
            }
            TranslationTarget::ContainerContent(container_id) => {
                let slot = self.locate(container_id)?;
                self.container_at_mut(slot)
                    .content
                    .entry(field.to_string())
                    .or_insert_with(MultilingualText::default)
                    .set(language, text);
            }
            TranslationTarget::PageTitle(page_id) => {
                let index = self.page_index(page_id)?;
                let page = &mut self.pages[index];
                page.title.set(language, text);
                page.touch();
            }
        }
        Ok(())
    }
}
