//! Content collection items (news, events, documents, contacts, slides,
//! generic container items).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::id::ItemId;
use super::language::LanguageCode;

/// Publication state of a content item or page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Draft,
    Published,
}

impl Status {
    pub fn is_published(&self) -> bool {
        matches!(self, Status::Published)
    }
}

/// A shared content collection that containers can draw tagged items from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collection {
    News,
    Event,
    Document,
    /// Older containers store this source as `Contacts`.
    #[serde(alias = "Contacts")]
    Contact,
    SliderItem,
    ContainerItem,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::News,
        Collection::Event,
        Collection::Document,
        Collection::Contact,
        Collection::SliderItem,
        Collection::ContainerItem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::News => "News",
            Collection::Event => "Event",
            Collection::Document => "Document",
            Collection::Contact => "Contact",
            Collection::SliderItem => "SliderItem",
            Collection::ContainerItem => "ContainerItem",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown collection name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown collection: {0}")]
pub struct UnknownCollection(pub String);

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "News" => Ok(Collection::News),
            "Event" => Ok(Collection::Event),
            "Document" => Ok(Collection::Document),
            "Contact" | "Contacts" => Ok(Collection::Contact),
            "SliderItem" => Ok(Collection::SliderItem),
            "ContainerItem" => Ok(Collection::ContainerItem),
            other => Err(UnknownCollection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsFields {
    pub title: String,
    pub summary: String,
    pub body: String,
    pub image_url: Option<String>,
    pub publish_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventFields {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentFields {
    pub title: String,
    pub description: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactFields {
    pub full_name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderItemFields {
    pub title: String,
    pub subtitle: String,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerItemFields {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
}

/// Collection-specific fields. The variant decides which collection an item
/// lives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "collection")]
pub enum ItemFields {
    News(NewsFields),
    Event(EventFields),
    Document(DocumentFields),
    #[serde(alias = "Contacts")]
    Contact(ContactFields),
    SliderItem(SliderItemFields),
    ContainerItem(ContainerItemFields),
}

impl ItemFields {
    pub fn collection(&self) -> Collection {
        match self {
            ItemFields::News(_) => Collection::News,
            ItemFields::Event(_) => Collection::Event,
            ItemFields::Document(_) => Collection::Document,
            ItemFields::Contact(_) => Collection::Contact,
            ItemFields::SliderItem(_) => Collection::SliderItem,
            ItemFields::ContainerItem(_) => Collection::ContainerItem,
        }
    }

    /// Primary display field (`title`, or `fullName` for contacts).
    pub fn display_name(&self) -> &str {
        match self {
            ItemFields::News(f) => &f.title,
            ItemFields::Event(f) => &f.title,
            ItemFields::Document(f) => &f.title,
            ItemFields::Contact(f) => &f.full_name,
            ItemFields::SliderItem(f) => &f.title,
            ItemFields::ContainerItem(f) => &f.title,
        }
    }

    /// Names of the fields that carry per-language overrides.
    pub fn localizable_fields(&self) -> &'static [&'static str] {
        match self {
            ItemFields::News(_) => &["title", "summary", "body"],
            ItemFields::Event(_) => &["title", "description", "location"],
            ItemFields::Document(_) => &["title", "description"],
            ItemFields::Contact(_) => &["position"],
            ItemFields::SliderItem(_) => &["title", "subtitle"],
            ItemFields::ContainerItem(_) => &["title", "description"],
        }
    }

    /// Base-language value of a text field, by its serialized name.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        let value = match (self, name) {
            (ItemFields::News(f), "title") => &f.title,
            (ItemFields::News(f), "summary") => &f.summary,
            (ItemFields::News(f), "body") => &f.body,
            (ItemFields::Event(f), "title") => &f.title,
            (ItemFields::Event(f), "description") => &f.description,
            (ItemFields::Event(f), "location") => &f.location,
            (ItemFields::Document(f), "title") => &f.title,
            (ItemFields::Document(f), "description") => &f.description,
            (ItemFields::Contact(f), "fullName") => &f.full_name,
            (ItemFields::Contact(f), "position") => &f.position,
            (ItemFields::Contact(f), "email") => &f.email,
            (ItemFields::Contact(f), "phone") => &f.phone,
            (ItemFields::SliderItem(f), "title") => &f.title,
            (ItemFields::SliderItem(f), "subtitle") => &f.subtitle,
            (ItemFields::ContainerItem(f), "title") => &f.title,
            (ItemFields::ContainerItem(f), "description") => &f.description,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// The image url slot, for collections that have one.
    pub fn image_url_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            ItemFields::News(f) => Some(&mut f.image_url),
            ItemFields::Event(f) => Some(&mut f.image_url),
            ItemFields::Contact(f) => Some(&mut f.image_url),
            ItemFields::SliderItem(f) => Some(&mut f.image_url),
            ItemFields::ContainerItem(f) => Some(&mut f.image_url),
            ItemFields::Document(_) => None,
        }
    }
}

/// Per-language overrides: language → field name → text.
pub type Translations = BTreeMap<LanguageCode, BTreeMap<String, String>>;

/// An item in one of the shared content collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ItemId,
    #[serde(default)]
    pub status: Status,
    #[serde(flatten)]
    pub fields: ItemFields,
    #[serde(default)]
    pub translations: Translations,
    pub modified_at: DateTime<Utc>,
}

impl ContentItem {
    /// Build a draft item from seed fields.
    pub fn draft(id: ItemId, fields: ItemFields) -> Self {
        Self {
            id,
            status: Status::Draft,
            fields,
            translations: Translations::new(),
            modified_at: Utc::now(),
        }
    }

    pub fn collection(&self) -> Collection {
        self.fields.collection()
    }

    pub fn display_name(&self) -> &str {
        self.fields.display_name()
    }

    pub fn is_published(&self) -> bool {
        self.status.is_published()
    }

    /// The raw translated value for a field, without fallback.
    pub fn translation(&self, lang: LanguageCode, field: &str) -> Option<&str> {
        self.translations
            .get(&lang)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    pub fn set_translation(&mut self, lang: LanguageCode, field: &str, text: impl Into<String>) {
        self.translations
            .entry(lang)
            .or_default()
            .insert(field.to_string(), text.into());
    }

    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

/// Seed for a new item; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(flatten)]
    pub fields: ItemFields,
    #[serde(default)]
    pub translations: Translations,
}

impl NewItem {
    pub fn new(fields: ItemFields) -> Self {
        Self {
            fields,
            translations: Translations::new(),
        }
    }

    pub fn collection(&self) -> Collection {
        self.fields.collection()
    }

    /// Materialize the item with an assigned id. New items always start as
    /// drafts.
    pub fn into_item(self, id: ItemId) -> ContentItem {
        let mut item = ContentItem::draft(id, self.fields);
        item.translations = self.translations;
        item
    }
}
