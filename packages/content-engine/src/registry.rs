//! Collection name → repository lookup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ReferentialError;
use crate::traits::repository::ContentRepository;
use crate::types::item::Collection;

/// Maps each content collection to the repository that persists it, so
/// tag, untag and create dispatch by lookup.
#[derive(Clone, Default)]
pub struct CollectionRegistry {
    repositories: HashMap<Collection, Arc<dyn ContentRepository>>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the repository for a collection.
    pub fn register(mut self, collection: Collection, repository: Arc<dyn ContentRepository>) -> Self {
        self.repositories.insert(collection, repository);
        self
    }

    /// Register one shared repository factory for every collection.
    pub fn with_all<F>(mut self, mut factory: F) -> Self
    where
        F: FnMut(Collection) -> Arc<dyn ContentRepository>,
    {
        for collection in Collection::ALL {
            self.repositories.insert(collection, factory(collection));
        }
        self
    }

    pub fn get(&self, collection: Collection) -> Result<&Arc<dyn ContentRepository>, ReferentialError> {
        self.repositories
            .get(&collection)
            .ok_or(ReferentialError::UnregisteredCollection(collection))
    }

    /// Registered collections in declaration order.
    pub fn collections(&self) -> impl Iterator<Item = Collection> + '_ {
        Collection::ALL
            .into_iter()
            .filter(|c| self.repositories.contains_key(c))
    }
}

impl std::fmt::Debug for CollectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionRegistry")
            .field("collections", &self.collections().collect::<Vec<_>>())
            .finish()
    }
}
