//! Storage for one content collection.

use async_trait::async_trait;

use crate::error::CollaboratorResult;
use crate::types::id::ItemId;
use crate::types::item::{ContentItem, NewItem};

/// CRUD access to a single content collection (news, events, ...).
///
/// One repository is registered per collection in the
/// [`CollectionRegistry`](crate::CollectionRegistry).
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetch every item of the collection, in storage order.
    async fn list_items(&self) -> CollaboratorResult<Vec<ContentItem>>;

    /// Create an item. The backend assigns the id and returns the stored
    /// item.
    async fn create_item(&self, item: NewItem) -> CollaboratorResult<ContentItem>;

    /// Overwrite an existing item.
    async fn update_item(&self, item: &ContentItem) -> CollaboratorResult<()>;

    /// Remove an item by id.
    async fn delete_item(&self, id: &ItemId) -> CollaboratorResult<()>;
}
