//! Content-Tagging and Publication Engine
//!
//! The state machine behind a visual site builder: how items from shared
//! content collections appear on pages by being tagged into containers, how
//! their publish status follows from those tags, how multilingual text is
//! resolved and how page and navigation order is persisted.
//!
//! # Usage
//!
//! ```rust,ignore
//! use content_engine::{SiteEditor, EngineConfig, MemoryBackend};
//! use content_engine::testing::MockTranslator;
//!
//! let backend = MemoryBackend::new();
//! let mut editor = SiteEditor::new(
//!     backend.registry(),
//!     Arc::new(backend.clone()),
//!     Arc::new(backend.clone()),
//!     Arc::new(MockTranslator::new()),
//! )
//! .with_config(EngineConfig::from_env()?);
//!
//! editor.load().await?;
//! let outcome = editor.tag(&container_id, &item_id).await?;
//! ```
//!
//! # Modules
//!
//! - [`editor`] - `SiteEditor`, the persisting entry point
//! - [`tagging`], [`ordering`], [`navigation`], [`translation`] - pure state transitions
//! - [`resolver`] - Multilingual text fallback
//! - [`traits`] - Collaborator contracts (storage, upload, translation)
//! - [`stores`] - In-memory collaborator implementation
//! - [`audit`] - Consistency checks over a loaded site
//! - [`testing`] - Mock translator and sample data

pub mod audit;
pub mod editor;
pub mod error;
pub mod navigation;
pub mod ordering;
pub mod registry;
pub mod resolver;
pub mod state;
pub mod store;
pub mod stores;
pub mod tagging;
pub mod testing;
pub mod traits;
pub mod translation;
pub mod types;

// Re-export core types at crate root
pub use audit::{audit, Finding};
pub use editor::SiteEditor;
pub use error::{
    CollaboratorError, ConfigError, EngineError, Outcome, ReferentialError, Result,
    ValidationError, Warning,
};
pub use navigation::{NavProblem, NavTree};
pub use ordering::Reorder;
pub use registry::CollectionRegistry;
pub use resolver::{resolve, resolve_item_field};
pub use state::SiteState;
pub use store::ContentStore;
pub use stores::MemoryBackend;
pub use tagging::{Purge, TagChange};
pub use traits::{
    assets::{AssetStore, UploadedAsset},
    repository::ContentRepository,
    site::SiteStore,
    translator::Translator,
};
pub use translation::{TranslationJob, TranslationTarget};
pub use types::{
    config::EngineConfig,
    container::{Container, ContainerSettings, ContainerType, TaggedSource},
    id::{ContainerId, ItemId, NavItemId, PageId},
    item::{Collection, ContentItem, ItemFields, NewItem, Status},
    language::LanguageCode,
    nav::{NavItem, NavParent, ROOT_SENTINEL},
    page::Page,
    text::MultilingualText,
};
