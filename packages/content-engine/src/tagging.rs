//! Tag / untag transitions and the publish-state rule.
//!
//! Per (container, item) pair the state is Untagged or Tagged. An item's
//! `status` is `Published` exactly when some container on some page tags it,
//! with one exception: items created straight into a container start tagged
//! as drafts and stay drafts until an editor publishes them.
//!
//! Everything here is a pure in-memory transition; persistence lives in
//! [`SiteEditor`](crate::SiteEditor).

use tracing::debug;

use crate::error::ReferentialError;
use crate::state::SiteState;
use crate::types::container::Container;
use crate::types::id::{ContainerId, ItemId};
use crate::types::item::{Collection, ContentItem, Status};

/// What a tag or untag transition changed.
#[derive(Debug, Clone, PartialEq)]
pub struct TagChange {
    /// The container after the transition.
    pub container: Container,
    /// `false` when the call was a no-op.
    pub changed: bool,
    /// The item after a status flip, if its status changed.
    pub status_change: Option<ContentItem>,
}

/// What purging an item from every container changed.
#[derive(Debug, Clone, PartialEq)]
pub struct Purge {
    pub item: ContentItem,
    /// Affected containers as they were before the purge.
    pub before: Vec<Container>,
    /// Affected containers after the purge.
    pub after: Vec<Container>,
}

impl SiteState {
    /// Source collection of a tag-bearing container.
    fn tag_source(&self, container_id: &ContainerId) -> Result<Collection, ReferentialError> {
        let container = self.container_at(self.locate(container_id)?);
        container
            .source()
            .ok_or_else(|| ReferentialError::NotTaggable {
                container: container.id.clone(),
                kind: container.container_type(),
            })
    }

    /// Tag an existing item into a container.
    ///
    /// Appends the id and promotes the item to `Published` if it is not
    /// already, whatever other containers reference it.
    pub fn tag(
        &mut self,
        container_id: &ContainerId,
        item_id: &ItemId,
    ) -> Result<TagChange, ReferentialError> {
        let source = self.tag_source(container_id)?;
        if !self.collections.contains(source, item_id) {
            return Err(ReferentialError::ForeignTag {
                item: item_id.clone(),
                source_collection: source,
            });
        }

        let slot = self.locate(container_id)?;
        let container = self.container_at_mut(slot);
        let changed = container
            .settings
            .tagged_source_mut()
            .is_some_and(|tags| tags.push(item_id.clone()));
        let container = container.clone();

        if !changed {
            return Ok(TagChange {
                container,
                changed: false,
                status_change: None,
            });
        }

        let status_change = self.set_status(source, item_id, Status::Published);
        debug!(
            container_id = %container_id,
            item_id = %item_id,
            promoted = status_change.is_some(),
            "Tagged item"
        );

        Ok(TagChange {
            container,
            changed: true,
            status_change,
        })
    }

    /// Remove an item from a container.
    ///
    /// A published item is demoted to `Draft` when no container on any page
    /// tags it once this container has let go of it.
    pub fn untag(
        &mut self,
        container_id: &ContainerId,
        item_id: &ItemId,
    ) -> Result<TagChange, ReferentialError> {
        let source = self.tag_source(container_id)?;
        let slot = self.locate(container_id)?;
        let container = self.container_at_mut(slot);
        let changed = container
            .settings
            .tagged_source_mut()
            .is_some_and(|tags| tags.remove(item_id));
        let container = container.clone();

        if !changed {
            return Ok(TagChange {
                container,
                changed: false,
                status_change: None,
            });
        }

        let status_change = self.demote_if_untagged(source, item_id);
        debug!(
            container_id = %container_id,
            item_id = %item_id,
            demoted = status_change.is_some(),
            "Untagged item"
        );

        Ok(TagChange {
            container,
            changed: true,
            status_change,
        })
    }

    /// Store a freshly created item and append it to the container without
    /// publishing it.
    pub fn attach_created(
        &mut self,
        container_id: &ContainerId,
        item: ContentItem,
    ) -> Result<Container, ReferentialError> {
        let source = self.tag_source(container_id)?;
        if item.collection() != source {
            return Err(ReferentialError::CollectionMismatch {
                expected: source,
                found: item.collection(),
            });
        }

        let slot = self.locate(container_id)?;
        let item_id = item.id.clone();
        self.collections.insert(item);

        let container = self.container_at_mut(slot);
        if let Some(tags) = container.settings.tagged_source_mut() {
            tags.push(item_id);
        }
        Ok(container.clone())
    }

    /// Remove an item from its collection and from every container that
    /// tags it.
    pub fn purge_item(
        &mut self,
        collection: Collection,
        item_id: &ItemId,
    ) -> Result<Purge, ReferentialError> {
        self.require_item(collection, item_id)?;

        let mut before = Vec::new();
        let mut after = Vec::new();
        for page in &mut self.pages {
            for container in &mut page.containers {
                if !container.references(collection, item_id) {
                    continue;
                }
                before.push(container.clone());
                if let Some(tags) = container.settings.tagged_source_mut() {
                    tags.remove(item_id);
                }
                after.push(container.clone());
            }
        }

        let item = self
            .collections
            .remove(collection, item_id)
            .ok_or_else(|| ReferentialError::UnknownItem {
                collection,
                id: item_id.clone(),
            })?;

        Ok(Purge {
            item,
            before,
            after,
        })
    }

    /// After containers holding `released` tags were removed, demote every
    /// published item that is no longer tagged anywhere.
    pub(crate) fn release_tags(&mut self, released: &[(Collection, ItemId)]) -> Vec<ContentItem> {
        released
            .iter()
            .filter_map(|(collection, id)| self.demote_if_untagged(*collection, id))
            .collect()
    }

    fn demote_if_untagged(&mut self, collection: Collection, item_id: &ItemId) -> Option<ContentItem> {
        let published = self
            .item(collection, item_id)
            .is_some_and(ContentItem::is_published);
        if !published || self.is_tagged_anywhere(collection, item_id) {
            return None;
        }
        self.set_status(collection, item_id, Status::Draft)
    }

    /// Set an item's status. Returns the updated item only if it changed.
    pub(crate) fn set_status(
        &mut self,
        collection: Collection,
        item_id: &ItemId,
        status: Status,
    ) -> Option<ContentItem> {
        let item = self.collections.get_mut(collection, item_id)?;
        if item.status == status {
            return None;
        }
        item.status = status;
        item.touch();
        Some(item.clone())
    }
}

/// Tags held by a container, as `(collection, id)` pairs.
pub(crate) fn held_tags(container: &Container) -> Vec<(Collection, ItemId)> {
    match container.source() {
        Some(source) => container
            .tagged_items()
            .iter()
            .map(|id| (source, id.clone()))
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavTree;
    use crate::store::ContentStore;
    use crate::types::container::{CardGridSettings, ContainerSettings, HeroSettings, TaggedSource};
    use crate::types::id::PageId;
    use crate::types::item::{ContactFields, ItemFields, NewsFields};
    use crate::types::page::Page;

    fn news(id: &str) -> ContentItem {
        ContentItem::draft(
            ItemId::from(id),
            ItemFields::News(NewsFields {
                title: format!("News {id}"),
                ..Default::default()
            }),
        )
    }

    fn grid(id: &str, page: &PageId, source: Collection, order: i32) -> Container {
        let mut container = Container::new(
            page.clone(),
            order,
            ContainerSettings::CardGrid(CardGridSettings {
                tags: TaggedSource::new(source),
                columns: 2,
            }),
        );
        container.id = ContainerId::from(id);
        container
    }

    /// Two pages; "home" has grids A and B, "about" has grid C and a hero.
    fn site() -> SiteState {
        let mut home = Page::new("Home".into(), "home");
        home.id = PageId::from("home");
        home.containers = vec![
            grid("A", &home.id, Collection::News, 0),
            grid("B", &home.id, Collection::News, 1),
        ];

        let mut about = Page::new("About".into(), "about");
        about.id = PageId::from("about");
        let mut hero = Container::new(about.id.clone(), 1, ContainerSettings::Hero(HeroSettings::default()));
        hero.id = ContainerId::from("H");
        about.containers = vec![grid("C", &about.id, Collection::News, 0), hero];

        let mut store = ContentStore::new();
        store.insert(news("x"));
        store.insert(news("y"));
        store.insert(ContentItem::draft(
            ItemId::from("x"),
            ItemFields::Contact(ContactFields {
                full_name: "Same id, other collection".into(),
                ..Default::default()
            }),
        ));

        SiteState::new(vec![home, about], store, NavTree::default())
    }

    fn status(state: &SiteState, id: &str) -> Status {
        state.item(Collection::News, &ItemId::from(id)).unwrap().status
    }

    #[test]
    fn test_tag_publishes_and_is_idempotent() {
        let mut state = site();
        let change = state.tag(&ContainerId::from("A"), &ItemId::from("x")).unwrap();
        assert!(change.changed);
        assert!(change.status_change.is_some());
        assert_eq!(status(&state, "x"), Status::Published);

        let again = state.tag(&ContainerId::from("A"), &ItemId::from("x")).unwrap();
        assert!(!again.changed);
        assert_eq!(again.container.tagged_items().len(), 1);
    }

    #[test]
    fn test_tag_into_second_container_keeps_single_promotion() {
        let mut state = site();
        state.tag(&ContainerId::from("A"), &ItemId::from("x")).unwrap();
        let change = state.tag(&ContainerId::from("C"), &ItemId::from("x")).unwrap();
        assert!(change.changed);
        assert!(change.status_change.is_none());
    }

    #[test]
    fn test_untag_demotes_only_after_last_reference() {
        let mut state = site();
        state.tag(&ContainerId::from("A"), &ItemId::from("x")).unwrap();
        state.tag(&ContainerId::from("C"), &ItemId::from("x")).unwrap();

        let first = state.untag(&ContainerId::from("A"), &ItemId::from("x")).unwrap();
        assert!(first.status_change.is_none());
        assert_eq!(status(&state, "x"), Status::Published);

        let last = state.untag(&ContainerId::from("C"), &ItemId::from("x")).unwrap();
        assert_eq!(last.status_change.map(|i| i.status), Some(Status::Draft));
        assert_eq!(status(&state, "x"), Status::Draft);
    }

    #[test]
    fn test_tag_rejects_foreign_and_untaggable() {
        let mut state = site();
        let before = state.clone();

        let err = state.tag(&ContainerId::from("A"), &ItemId::from("nope"));
        assert!(matches!(err, Err(ReferentialError::ForeignTag { .. })));

        let err = state.tag(&ContainerId::from("H"), &ItemId::from("x"));
        assert!(matches!(err, Err(ReferentialError::NotTaggable { .. })));

        let err = state.tag(&ContainerId::from("missing"), &ItemId::from("x"));
        assert!(matches!(err, Err(ReferentialError::UnknownContainer(_))));

        assert_eq!(state, before);
    }

    #[test]
    fn test_purge_removes_every_reference() {
        let mut state = site();
        for container in ["A", "B", "C"] {
            state.tag(&ContainerId::from(container), &ItemId::from("x")).unwrap();
        }

        let purge = state.purge_item(Collection::News, &ItemId::from("x")).unwrap();
        assert_eq!(purge.before.len(), 3);
        assert!(purge.after.iter().all(|c| c.tagged_items().is_empty()));
        assert!(!state.is_tagged_anywhere(Collection::News, &ItemId::from("x")));
        assert!(state.item(Collection::News, &ItemId::from("x")).is_none());
        // The contact sharing the id is untouched.
        assert!(state.item(Collection::Contact, &ItemId::from("x")).is_some());
    }
}
