//! Storage for pages, containers and the navigation tree.

use async_trait::async_trait;

use crate::error::CollaboratorResult;
use crate::types::container::Container;
use crate::types::id::{ContainerId, PageId};
use crate::types::nav::NavItem;
use crate::types::page::Page;

/// Persistence for site structure.
///
/// Batch methods (`save_containers`, `persist_page_order`,
/// `persist_nav_tree`) must apply all-or-nothing on the backend side; the
/// engine issues exactly one of them per reorder or cascade.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Every page, with its containers.
    async fn load_pages(&self) -> CollaboratorResult<Vec<Page>>;

    /// The whole navigation tree.
    async fn load_nav(&self) -> CollaboratorResult<Vec<NavItem>>;

    /// Create or overwrite page metadata and its containers.
    async fn save_page(&self, page: &Page) -> CollaboratorResult<()>;

    /// Remove a page and every container it owns.
    async fn delete_page(&self, id: &PageId) -> CollaboratorResult<()>;

    /// Create or overwrite one container.
    async fn save_container(&self, container: &Container) -> CollaboratorResult<()>;

    /// Overwrite several containers in one call.
    async fn save_containers(&self, containers: &[Container]) -> CollaboratorResult<()>;

    async fn delete_container(&self, id: &ContainerId) -> CollaboratorResult<()>;

    /// Store the `order` of every container of a page in one call.
    async fn persist_page_order(
        &self,
        page_id: &PageId,
        containers: &[Container],
    ) -> CollaboratorResult<()>;

    /// Store the whole navigation tree in one call.
    async fn persist_nav_tree(&self, items: &[NavItem]) -> CollaboratorResult<()>;
}
