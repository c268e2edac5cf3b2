//! The editor's in-memory application state.
//!
//! `SiteState` holds pages (with their containers), the content collections
//! and the navigation tree. Engine transitions on it are synchronous and do
//! no IO; [`SiteEditor`](crate::SiteEditor) pairs each transition with the
//! matching collaborator calls.

use serde::{Deserialize, Serialize};

use crate::error::ReferentialError;
use crate::navigation::NavTree;
use crate::store::ContentStore;
use crate::types::container::Container;
use crate::types::id::{ContainerId, ItemId, PageId};
use crate::types::item::{Collection, ContentItem};
use crate::types::page::Page;

/// Pages, content collections and navigation for one site.
///
/// Also the JSON snapshot format read by `site_audit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteState {
    #[serde(default)]
    pub(crate) pages: Vec<Page>,
    #[serde(default)]
    pub(crate) collections: ContentStore,
    #[serde(default)]
    pub(crate) nav: NavTree,
}

/// Position of a container inside [`SiteState::pages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub page: usize,
    pub container: usize,
}

impl SiteState {
    pub fn new(pages: Vec<Page>, collections: ContentStore, nav: NavTree) -> Self {
        let mut state = Self {
            pages,
            collections,
            nav,
        };
        for page in &mut state.pages {
            page.sort_containers();
        }
        state
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    pub(crate) fn page_index(&self, id: &PageId) -> Result<usize, ReferentialError> {
        self.pages
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| ReferentialError::UnknownPage(id.clone()))
    }

    pub fn collections(&self) -> &ContentStore {
        &self.collections
    }

    pub fn nav(&self) -> &NavTree {
        &self.nav
    }

    pub fn item(&self, collection: Collection, id: &ItemId) -> Option<&ContentItem> {
        self.collections.get(collection, id)
    }

    pub(crate) fn require_item(
        &self,
        collection: Collection,
        id: &ItemId,
    ) -> Result<&ContentItem, ReferentialError> {
        self.item(collection, id)
            .ok_or_else(|| ReferentialError::UnknownItem {
                collection,
                id: id.clone(),
            })
    }

    /// Every container on every page, in page then render order.
    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.pages.iter().flat_map(|p| p.containers.iter())
    }

    pub fn container(&self, id: &ContainerId) -> Option<&Container> {
        self.containers().find(|c| &c.id == id)
    }

    pub(crate) fn locate(&self, id: &ContainerId) -> Result<Slot, ReferentialError> {
        self.pages
            .iter()
            .enumerate()
            .find_map(|(page, p)| {
                p.containers
                    .iter()
                    .position(|c| &c.id == id)
                    .map(|container| Slot { page, container })
            })
            .ok_or_else(|| ReferentialError::UnknownContainer(id.clone()))
    }

    pub(crate) fn container_at(&self, slot: Slot) -> &Container {
        &self.pages[slot.page].containers[slot.container]
    }

    pub(crate) fn container_at_mut(&mut self, slot: Slot) -> &mut Container {
        &mut self.pages[slot.page].containers[slot.container]
    }

    /// Containers, on any page, whose source is `collection` and which have
    /// `item_id` tagged.
    pub fn containers_tagging(
        &self,
        collection: Collection,
        item_id: &ItemId,
    ) -> impl Iterator<Item = &Container> {
        let item_id = item_id.clone();
        self.containers()
            .filter(move |c| c.references(collection, &item_id))
    }

    /// Returns `true` if any container anywhere still tags the item.
    pub fn is_tagged_anywhere(&self, collection: Collection, item_id: &ItemId) -> bool {
        self.containers_tagging(collection, item_id).next().is_some()
    }
}
