//! In-memory content collections.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::id::ItemId;
use crate::types::item::{Collection, ContentItem};

/// Collection → items, both in insertion order.
///
/// This is the editor's single source of truth for content items. It is
/// mutated only by the [`SiteEditor`](crate::SiteEditor) operations, which
/// also call the persistence collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoreRepr", into = "StoreRepr")]
pub struct ContentStore {
    collections: IndexMap<Collection, IndexMap<ItemId, ContentItem>>,
}

type StoreRepr = IndexMap<Collection, Vec<ContentItem>>;

impl From<StoreRepr> for ContentStore {
    fn from(repr: StoreRepr) -> Self {
        let mut store = ContentStore::new();
        for (collection, items) in repr {
            store.extend(collection, items);
        }
        store
    }
}

impl From<ContentStore> for StoreRepr {
    fn from(store: ContentStore) -> Self {
        store
            .collections
            .into_iter()
            .map(|(collection, items)| (collection, items.into_values().collect()))
            .collect()
    }
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a whole collection, e.g. after a fresh list call.
    ///
    /// Items whose fields belong to another collection are skipped.
    pub fn replace_collection(&mut self, collection: Collection, items: Vec<ContentItem>) {
        self.collections.insert(collection, IndexMap::new());
        self.extend(collection, items);
    }

    fn extend(&mut self, collection: Collection, items: Vec<ContentItem>) {
        let entries = self.collections.entry(collection).or_default();
        for item in items {
            if item.collection() == collection {
                entries.insert(item.id.clone(), item);
            } else {
                tracing::warn!(
                    item_id = %item.id,
                    expected = %collection,
                    actual = %item.collection(),
                    "Skipping item listed under the wrong collection"
                );
            }
        }
    }

    pub fn items(&self, collection: Collection) -> impl Iterator<Item = &ContentItem> {
        self.collections
            .get(&collection)
            .into_iter()
            .flat_map(|items| items.values())
    }

    pub fn get(&self, collection: Collection, id: &ItemId) -> Option<&ContentItem> {
        self.collections.get(&collection)?.get(id)
    }

    pub fn get_mut(&mut self, collection: Collection, id: &ItemId) -> Option<&mut ContentItem> {
        self.collections.get_mut(&collection)?.get_mut(id)
    }

    pub fn contains(&self, collection: Collection, id: &ItemId) -> bool {
        self.get(collection, id).is_some()
    }

    /// Append an item to its collection (or overwrite it in place).
    pub fn insert(&mut self, item: ContentItem) {
        self.collections
            .entry(item.collection())
            .or_default()
            .insert(item.id.clone(), item);
    }

    /// Remove an item, keeping the order of the rest.
    pub fn remove(&mut self, collection: Collection, id: &ItemId) -> Option<ContentItem> {
        self.collections.get_mut(&collection)?.shift_remove(id)
    }

    pub fn len(&self, collection: Collection) -> usize {
        self.collections.get(&collection).map_or(0, |items| items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.collections.values().all(|items| items.is_empty())
    }

    /// Every item across all collections.
    pub fn all_items(&self) -> impl Iterator<Item = &ContentItem> {
        self.collections.values().flat_map(|items| items.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::item::{ItemFields, NewsFields};

    fn news(id: &str, title: &str) -> ContentItem {
        ContentItem::draft(
            ItemId::from(id),
            ItemFields::News(NewsFields {
                title: title.into(),
                ..Default::default()
            }),
        )
    }

    #[test]
    fn test_insert_get_remove() {
        let mut store = ContentStore::new();
        store.insert(news("1", "One"));
        store.insert(news("2", "Two"));
        store.insert(news("3", "Three"));

        assert_eq!(store.len(Collection::News), 3);
        assert!(store.contains(Collection::News, &ItemId::from("2")));
        assert!(!store.contains(Collection::Event, &ItemId::from("2")));

        store.remove(Collection::News, &ItemId::from("2"));
        let titles: Vec<_> = store.items(Collection::News).map(|i| i.display_name()).collect();
        assert_eq!(titles, vec!["One", "Three"]);
    }

    #[test]
    fn test_replace_collection_skips_mismatched_items() {
        let mut store = ContentStore::new();
        store.replace_collection(Collection::Event, vec![news("1", "Misfiled")]);
        assert_eq!(store.len(Collection::Event), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_serializes_as_lists() {
        let mut store = ContentStore::new();
        store.insert(news("1", "One"));

        let json = serde_json::to_value(&store).unwrap();
        assert!(json["News"].is_array());

        let back: ContentStore = serde_json::from_value(json).unwrap();
        assert_eq!(back, store);
    }
}
