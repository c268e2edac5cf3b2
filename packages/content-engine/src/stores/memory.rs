//! In-memory backend for testing and development.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{CollaboratorError, CollaboratorResult};
use crate::registry::CollectionRegistry;
use crate::traits::{
    assets::{AssetStore, UploadedAsset},
    repository::ContentRepository,
    site::SiteStore,
};
use crate::types::{
    container::Container,
    id::{ContainerId, ItemId, PageId},
    item::{Collection, ContentItem, NewItem},
    nav::NavItem,
    page::Page,
};

#[derive(Debug, Default)]
struct Tables {
    items: IndexMap<Collection, IndexMap<ItemId, ContentItem>>,
    pages: IndexMap<PageId, Page>,
    nav: Vec<NavItem>,
    /// Uploaded asset url → size in bytes
    assets: IndexMap<String, usize>,
}

impl Tables {
    fn page_mut(&mut self, id: &PageId) -> CollaboratorResult<&mut Page> {
        self.pages
            .get_mut(id)
            .ok_or_else(|| CollaboratorError::NotFound(format!("page {id}")))
    }

    fn upsert_container(&mut self, container: &Container) -> CollaboratorResult<()> {
        let page = self.page_mut(&container.page_id)?;
        match page.container_mut(&container.id) {
            Some(existing) => *existing = container.clone(),
            None => page.containers.push(container.clone()),
        }
        page.sort_containers();
        Ok(())
    }
}

/// Record of a call made to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCall {
    pub operation: &'static str,
    pub subject: String,
}

/// In-memory content collections, site structure and assets.
///
/// Clones share the same tables, so one backend can be handed to the
/// editor as every collaborator and inspected afterwards. Operations can be
/// made to fail by name with [`fail`](Self::fail). Not suitable for
/// production as data is lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    tables: Arc<RwLock<Tables>>,
    failing: Arc<RwLock<HashSet<&'static str>>>,
    calls: Arc<RwLock<Vec<BackendCall>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call and fail it if the operation is marked failing.
    fn enter(&self, operation: &'static str, subject: impl Into<String>) -> CollaboratorResult<()> {
        self.calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(BackendCall {
                operation,
                subject: subject.into(),
            });

        let failing = self.failing.read().unwrap_or_else(PoisonError::into_inner);
        if failing.contains(operation) {
            return Err(CollaboratorError::Unavailable(format!(
                "{operation} is unavailable"
            )));
        }
        Ok(())
    }

    /// Seed stored items.
    pub fn with_items(self, items: impl IntoIterator<Item = ContentItem>) -> Self {
        {
            let mut tables = self.write();
            for item in items {
                tables
                    .items
                    .entry(item.collection())
                    .or_default()
                    .insert(item.id.clone(), item);
            }
        }
        self
    }

    /// Seed a stored page with its containers.
    pub fn with_page(self, page: Page) -> Self {
        self.write().pages.insert(page.id.clone(), page);
        self
    }

    /// Seed the stored navigation tree.
    pub fn with_nav(self, nav: Vec<NavItem>) -> Self {
        self.write().nav = nav;
        self
    }

    /// Make every later call to `operation` fail as unavailable.
    pub fn fail(&self, operation: &'static str) {
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(operation);
    }

    /// Undo [`fail`](Self::fail).
    pub fn recover(&self, operation: &'static str) {
        self.failing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(operation);
    }

    /// Get all calls made to this backend, failed ones included.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls made to `operation`.
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn stored_item(&self, collection: Collection, id: &ItemId) -> Option<ContentItem> {
        self.read()
            .items
            .get(&collection)
            .and_then(|items| items.get(id))
            .cloned()
    }

    pub fn stored_page(&self, id: &PageId) -> Option<Page> {
        self.read().pages.get(id).cloned()
    }

    pub fn stored_container(&self, id: &ContainerId) -> Option<Container> {
        self.read()
            .pages
            .values()
            .flat_map(|p| p.containers.iter())
            .find(|c| &c.id == id)
            .cloned()
    }

    pub fn stored_nav(&self) -> Vec<NavItem> {
        self.read().nav.clone()
    }

    pub fn asset_count(&self) -> usize {
        self.read().assets.len()
    }

    /// A repository handle for one collection.
    pub fn repository(&self, collection: Collection) -> Arc<dyn ContentRepository> {
        Arc::new(MemoryRepository {
            backend: self.clone(),
            collection,
        })
    }

    /// A registry with a handle for every collection.
    pub fn registry(&self) -> CollectionRegistry {
        CollectionRegistry::new().with_all(|collection| self.repository(collection))
    }
}

/// One collection of a [`MemoryBackend`].
struct MemoryRepository {
    backend: MemoryBackend,
    collection: Collection,
}

#[async_trait]
impl ContentRepository for MemoryRepository {
    async fn list_items(&self) -> CollaboratorResult<Vec<ContentItem>> {
        self.backend.enter("list_items", self.collection.as_str())?;
        Ok(self
            .backend
            .read()
            .items
            .get(&self.collection)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn create_item(&self, item: NewItem) -> CollaboratorResult<ContentItem> {
        self.backend.enter("create_item", self.collection.as_str())?;
        if item.collection() != self.collection {
            return Err(CollaboratorError::Backend(
                format!(
                    "{} item sent to {} repository",
                    item.collection(),
                    self.collection
                )
                .into(),
            ));
        }

        let created = item.into_item(ItemId::generate());
        self.backend
            .write()
            .items
            .entry(self.collection)
            .or_default()
            .insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_item(&self, item: &ContentItem) -> CollaboratorResult<()> {
        self.backend.enter("update_item", item.id.as_str())?;
        let mut tables = self.backend.write();
        let stored = tables
            .items
            .get_mut(&self.collection)
            .and_then(|items| items.get_mut(&item.id))
            .ok_or_else(|| CollaboratorError::NotFound(format!("{} {}", self.collection, item.id)))?;
        *stored = item.clone();
        Ok(())
    }

    async fn delete_item(&self, id: &ItemId) -> CollaboratorResult<()> {
        self.backend.enter("delete_item", id.as_str())?;
        self.backend
            .write()
            .items
            .get_mut(&self.collection)
            .and_then(|items| items.shift_remove(id))
            .map(|_| ())
            .ok_or_else(|| CollaboratorError::NotFound(format!("{} {id}", self.collection)))
    }
}

#[async_trait]
impl SiteStore for MemoryBackend {
    async fn load_pages(&self) -> CollaboratorResult<Vec<Page>> {
        self.enter("load_pages", "")?;
        Ok(self.read().pages.values().cloned().collect())
    }

    async fn load_nav(&self) -> CollaboratorResult<Vec<NavItem>> {
        self.enter("load_nav", "")?;
        Ok(self.read().nav.clone())
    }

    async fn save_page(&self, page: &Page) -> CollaboratorResult<()> {
        self.enter("save_page", page.id.as_str())?;
        self.write().pages.insert(page.id.clone(), page.clone());
        Ok(())
    }

    async fn delete_page(&self, id: &PageId) -> CollaboratorResult<()> {
        self.enter("delete_page", id.as_str())?;
        self.write()
            .pages
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| CollaboratorError::NotFound(format!("page {id}")))
    }

    async fn save_container(&self, container: &Container) -> CollaboratorResult<()> {
        self.enter("save_container", container.id.as_str())?;
        self.write().upsert_container(container)
    }

    async fn save_containers(&self, containers: &[Container]) -> CollaboratorResult<()> {
        let subject = containers
            .iter()
            .map(|c| c.id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        self.enter("save_containers", subject)?;

        let mut tables = self.write();
        if let Some(missing) = containers
            .iter()
            .find(|c| !tables.pages.contains_key(&c.page_id))
        {
            return Err(CollaboratorError::NotFound(format!("page {}", missing.page_id)));
        }
        for container in containers {
            tables.upsert_container(container)?;
        }
        Ok(())
    }

    async fn delete_container(&self, id: &ContainerId) -> CollaboratorResult<()> {
        self.enter("delete_container", id.as_str())?;
        let mut tables = self.write();
        for page in tables.pages.values_mut() {
            if let Some(position) = page.containers.iter().position(|c| &c.id == id) {
                page.containers.remove(position);
                return Ok(());
            }
        }
        Err(CollaboratorError::NotFound(format!("container {id}")))
    }

    async fn persist_page_order(
        &self,
        page_id: &PageId,
        containers: &[Container],
    ) -> CollaboratorResult<()> {
        self.enter("persist_page_order", page_id.as_str())?;
        let mut tables = self.write();
        let page = tables.page_mut(page_id)?;
        for container in containers {
            if let Some(stored) = page.container_mut(&container.id) {
                stored.order = container.order;
            }
        }
        page.sort_containers();
        Ok(())
    }

    async fn persist_nav_tree(&self, items: &[NavItem]) -> CollaboratorResult<()> {
        self.enter("persist_nav_tree", items.len().to_string())?;
        self.write().nav = items.to_vec();
        Ok(())
    }
}

#[async_trait]
impl AssetStore for MemoryBackend {
    async fn upload_asset(
        &self,
        bytes: &[u8],
        file_name: &str,
        folder: &str,
    ) -> CollaboratorResult<UploadedAsset> {
        self.enter("upload_asset", file_name)?;
        let url = format!("memory://{folder}/{file_name}");
        self.write().assets.insert(url.clone(), bytes.len());
        Ok(UploadedAsset {
            url,
            name: file_name.to_string(),
        })
    }
}
