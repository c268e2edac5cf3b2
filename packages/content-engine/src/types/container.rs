//! Typed content blocks placed on a page.
//!
//! Every container type carries its own settings struct. Data-bearing types
//! (slider, card grid, table) embed a [`TaggedSource`]: the collection they
//! draw from plus the ordered ids tagged into them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::id::{ContainerId, ItemId, PageId};
use super::item::Collection;
use super::text::MultilingualText;

/// Container type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerType {
    Hero,
    Slider,
    CardGrid,
    ContactForm,
    Table,
    Map,
    ImageText,
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContainerType::Hero => "HERO",
            ContainerType::Slider => "SLIDER",
            ContainerType::CardGrid => "CARD_GRID",
            ContainerType::ContactForm => "CONTACT_FORM",
            ContainerType::Table => "TABLE",
            ContainerType::Map => "MAP",
            ContainerType::ImageText => "IMAGE_TEXT",
        };
        f.write_str(name)
    }
}

/// The pivot between a container and a content collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedSource {
    pub source: Collection,
    #[serde(default)]
    pub tagged_items: Vec<ItemId>,
}

impl TaggedSource {
    pub fn new(source: Collection) -> Self {
        Self {
            source,
            tagged_items: Vec::new(),
        }
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.tagged_items.contains(item_id)
    }

    /// Append at the end. Returns `false` if the id was already tagged.
    pub fn push(&mut self, item_id: ItemId) -> bool {
        if self.contains(&item_id) {
            return false;
        }
        self.tagged_items.push(item_id);
        true
    }

    /// Remove an id. Returns `false` if it was not tagged.
    pub fn remove(&mut self, item_id: &ItemId) -> bool {
        let before = self.tagged_items.len();
        self.tagged_items.retain(|id| id != item_id);
        self.tagged_items.len() != before
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSettings {
    pub image_url: Option<String>,
    pub cta_url: Option<String>,
    pub full_height: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderSettings {
    #[serde(flatten)]
    pub tags: TaggedSource,
    pub columns: usize,
    #[serde(default)]
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGridSettings {
    #[serde(flatten)]
    pub tags: TaggedSource,
    pub columns: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactFormSettings {
    pub recipient_email: String,
    pub subject: String,
    pub success_message: Option<MultilingualText>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSettings {
    #[serde(flatten)]
    pub tags: TaggedSource,
    #[serde(default)]
    pub visible_columns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapSettings {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageTextSettings {
    pub image_url: Option<String>,
    pub image_position: ImagePosition,
}

/// Settings keyed by container type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "settings", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerSettings {
    Hero(HeroSettings),
    Slider(SliderSettings),
    CardGrid(CardGridSettings),
    ContactForm(ContactFormSettings),
    Table(TableSettings),
    Map(MapSettings),
    ImageText(ImageTextSettings),
}

impl ContainerSettings {
    /// Default settings for a freshly added container of `kind`.
    ///
    /// Data-bearing kinds require a source collection.
    pub fn for_type(kind: ContainerType, source: Option<Collection>) -> Option<Self> {
        let settings = match kind {
            ContainerType::Hero => ContainerSettings::Hero(HeroSettings::default()),
            ContainerType::ContactForm => {
                ContainerSettings::ContactForm(ContactFormSettings::default())
            }
            ContainerType::Map => ContainerSettings::Map(MapSettings::default()),
            ContainerType::ImageText => ContainerSettings::ImageText(ImageTextSettings::default()),
            ContainerType::Slider => ContainerSettings::Slider(SliderSettings {
                tags: TaggedSource::new(source?),
                columns: 1,
                autoplay: false,
            }),
            ContainerType::CardGrid => ContainerSettings::CardGrid(CardGridSettings {
                tags: TaggedSource::new(source?),
                columns: 3,
            }),
            ContainerType::Table => ContainerSettings::Table(TableSettings {
                tags: TaggedSource::new(source?),
                visible_columns: Vec::new(),
            }),
        };
        Some(settings)
    }

    pub fn container_type(&self) -> ContainerType {
        match self {
            ContainerSettings::Hero(_) => ContainerType::Hero,
            ContainerSettings::Slider(_) => ContainerType::Slider,
            ContainerSettings::CardGrid(_) => ContainerType::CardGrid,
            ContainerSettings::ContactForm(_) => ContainerType::ContactForm,
            ContainerSettings::Table(_) => ContainerType::Table,
            ContainerSettings::Map(_) => ContainerType::Map,
            ContainerSettings::ImageText(_) => ContainerType::ImageText,
        }
    }

    pub fn tagged_source(&self) -> Option<&TaggedSource> {
        match self {
            ContainerSettings::Slider(s) => Some(&s.tags),
            ContainerSettings::CardGrid(s) => Some(&s.tags),
            ContainerSettings::Table(s) => Some(&s.tags),
            _ => None,
        }
    }

    pub fn tagged_source_mut(&mut self) -> Option<&mut TaggedSource> {
        match self {
            ContainerSettings::Slider(s) => Some(&mut s.tags),
            ContainerSettings::CardGrid(s) => Some(&mut s.tags),
            ContainerSettings::Table(s) => Some(&mut s.tags),
            _ => None,
        }
    }

    /// Minimum tagged items the layout expects, for column-based types.
    pub fn columns(&self) -> Option<usize> {
        match self {
            ContainerSettings::Slider(s) => Some(s.columns),
            ContainerSettings::CardGrid(s) => Some(s.columns),
            _ => None,
        }
    }
}

/// A typed content block owned by exactly one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: ContainerId,
    pub page_id: PageId,
    pub order: i32,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(flatten)]
    pub settings: ContainerSettings,
    #[serde(default)]
    pub content: BTreeMap<String, MultilingualText>,
}

fn default_visible() -> bool {
    true
}

impl Container {
    pub fn new(page_id: PageId, order: i32, settings: ContainerSettings) -> Self {
        Self {
            id: ContainerId::generate(),
            page_id,
            order,
            is_visible: true,
            settings,
            content: BTreeMap::new(),
        }
    }

    pub fn container_type(&self) -> ContainerType {
        self.settings.container_type()
    }

    pub fn source(&self) -> Option<Collection> {
        self.settings.tagged_source().map(|t| t.source)
    }

    pub fn tagged_items(&self) -> &[ItemId] {
        self.settings
            .tagged_source()
            .map(|t| t.tagged_items.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if this container draws from `collection` and has
    /// `item_id` tagged.
    pub fn references(&self, collection: Collection, item_id: &ItemId) -> bool {
        self.settings
            .tagged_source()
            .is_some_and(|t| t.source == collection && t.contains(item_id))
    }

    /// `Some((tagged, columns))` when fewer items are tagged than the layout
    /// has columns.
    pub fn underfill(&self) -> Option<(usize, usize)> {
        let columns = self.settings.columns()?;
        let tagged = self.tagged_items().len();
        (tagged < columns).then_some((tagged, columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_json_shape() {
        let json = r#"{
            "id": "c1",
            "pageId": "p1",
            "order": 2,
            "type": "CARD_GRID",
            "settings": {"source": "Contacts", "taggedItems": ["5", "9"], "columns": 3},
            "content": {"heading": {"en": "Team", "de": "Team"}}
        }"#;

        let container: Container = serde_json::from_str(json).unwrap();
        assert_eq!(container.container_type(), ContainerType::CardGrid);
        assert_eq!(container.source(), Some(Collection::Contact));
        assert!(container.is_visible);
        assert_eq!(container.tagged_items().len(), 2);
        assert_eq!(container.underfill(), Some((2, 3)));
    }

    #[test]
    fn test_tagged_source_rejects_duplicates() {
        let mut tags = TaggedSource::new(Collection::News);
        assert!(tags.push(ItemId::from("1")));
        assert!(!tags.push(ItemId::from("1")));
        assert_eq!(tags.tagged_items.len(), 1);

        assert!(tags.remove(&ItemId::from("1")));
        assert!(!tags.remove(&ItemId::from("1")));
    }

    #[test]
    fn test_data_bearing_types_need_a_source() {
        assert!(ContainerSettings::for_type(ContainerType::Slider, None).is_none());
        assert!(ContainerSettings::for_type(ContainerType::Hero, None).is_some());

        let grid =
            ContainerSettings::for_type(ContainerType::CardGrid, Some(Collection::News)).unwrap();
        assert_eq!(grid.columns(), Some(3));
    }
}
