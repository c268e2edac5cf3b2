//! Typed errors and soft warnings for the content engine.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Failures split into
//! hard errors, which leave state untouched, and [`Warning`]s, which ride
//! along with a successful [`Outcome`] after an optimistic mutation.

use thiserror::Error;

use crate::types::container::ContainerType;
use crate::types::id::{ContainerId, ItemId, NavItemId, PageId};
use crate::types::item::Collection;
use crate::types::language::LanguageCode;

/// Errors returned by engine operations. None of them mutate state.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input rejected before anything was changed
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Operation would break referential integrity; rejected as a no-op
    #[error("referential violation: {0}")]
    Referential(#[from] ReferentialError),

    /// A collaborator call failed where the operation cannot stay optimistic
    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{collection} item needs a non-empty title")]
    EmptyTitle { collection: Collection },

    #[error("page needs a non-empty title")]
    EmptyPageTitle,

    #[error("page slug must not be empty")]
    EmptySlug,

    #[error("slug already in use: {0}")]
    DuplicateSlug(String),

    #[error("{0} containers need a source collection")]
    MissingSource(ContainerType),

    #[error("{0} items have no image field")]
    NoImageSlot(Collection),

    #[error("uploaded asset is empty")]
    EmptyAsset,

    #[error("{collection} item {id} is not tagged anywhere and cannot be published")]
    PublishUntagged { collection: Collection, id: ItemId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferentialError {
    #[error("no {collection} item with id {id}")]
    UnknownItem { collection: Collection, id: ItemId },

    #[error("no container with id {0}")]
    UnknownContainer(ContainerId),

    #[error("no page with id {0}")]
    UnknownPage(PageId),

    #[error("no navigation node with id {0}")]
    UnknownNavItem(NavItemId),

    #[error("{kind} container {container} does not hold tagged items")]
    NotTaggable {
        container: ContainerId,
        kind: ContainerType,
    },

    #[error("item {item} is not in source collection {source_collection}")]
    ForeignTag {
        item: ItemId,
        source_collection: Collection,
    },

    #[error("container takes {expected} items, got {found}")]
    CollectionMismatch {
        expected: Collection,
        found: Collection,
    },

    #[error("moving {item} under {parent} would create a cycle")]
    NavCycle { item: NavItemId, parent: NavItemId },

    #[error("page {0} already has a navigation node")]
    PageAlreadyInNav(PageId),

    #[error("no repository registered for {0}")]
    UnregisteredCollection(Collection),
}

/// Errors surfaced by external collaborators (storage, upload, translation).
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// Service unreachable or refused the call
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Backend has no record of the entity
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other backend failure
    #[error("backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors loading [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Non-fatal condition reported alongside a completed operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Persistence failed; the in-memory change was kept.
    CollaboratorUnavailable {
        operation: &'static str,
        message: String,
    },

    /// A column-based container shows fewer items than it has columns.
    UnderFilled {
        container: ContainerId,
        tagged: usize,
        columns: usize,
    },

    /// The translator returned nothing for a field; it was left unset.
    TranslationMissing {
        field: String,
        language: LanguageCode,
    },
}

impl Warning {
    pub fn collaborator(operation: &'static str, err: &CollaboratorError) -> Self {
        Warning::CollaboratorUnavailable {
            operation,
            message: err.to_string(),
        }
    }
}

/// Result of an operation that completed, plus any warnings for the editor.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Outcome<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn push(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Keep the optimistic change behind a failed collaborator call and
    /// report the failure as a warning.
    pub fn tolerate(&mut self, operation: &'static str, result: CollaboratorResult<()>) {
        if let Err(err) = result {
            tracing::warn!(operation, error = %err, "Persistence failed, keeping in-memory change");
            self.push(Warning::collaborator(operation, &err));
        }
    }

    /// Returns `true` when no warnings were raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Result type alias for collaborator calls.
pub type CollaboratorResult<T> = std::result::Result<T, CollaboratorError>;
