//! The SiteEditor - main entry point for the content engine.
//!
//! Every operation applies its change to the in-memory [`SiteState`] first
//! and only then awaits the collaborators. A failed save keeps the
//! optimistic change and reports a [`Warning`]; operations that cannot stay
//! optimistic (loading, creating, deleting an item) return an error and
//! leave the state as it was.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::error::{
    CollaboratorError, Outcome, ReferentialError, Result, ValidationError, Warning,
};
use crate::navigation::NavTree;
use crate::ordering::{self, Reorder};
use crate::registry::CollectionRegistry;
use crate::resolver;
use crate::state::SiteState;
use crate::store::ContentStore;
use crate::tagging::held_tags;
use crate::traits::{
    assets::AssetStore, repository::ContentRepository, site::SiteStore, translator::Translator,
};
use crate::translation::TranslationTarget;
use crate::types::{
    config::EngineConfig,
    container::{Container, ContainerSettings, ContainerType},
    id::{ContainerId, ItemId, NavItemId, PageId},
    item::{Collection, ContentItem, NewItem, Status},
    language::LanguageCode,
    nav::{NavItem, NavParent},
    page::Page,
    text::MultilingualText,
};

fn underfill_warning(container: &Container) -> Option<Warning> {
    container
        .underfill()
        .map(|(tagged, columns)| Warning::UnderFilled {
            container: container.id.clone(),
            tagged,
            columns,
        })
}

/// One editing session over a site.
///
/// # Example
///
/// ```rust,ignore
/// let backend = MemoryBackend::new();
/// let mut editor = SiteEditor::new(
///     backend.registry(),
///     Arc::new(backend.clone()),
///     Arc::new(backend.clone()),
///     Arc::new(translator),
/// );
/// editor.load().await?;
///
/// let outcome = editor.tag(&grid_id, &news_id).await?;
/// for warning in &outcome.warnings {
///     println!("{warning:?}");
/// }
/// ```
pub struct SiteEditor {
    state: SiteState,
    registry: CollectionRegistry,
    site: Arc<dyn SiteStore>,
    assets: Arc<dyn AssetStore>,
    translator: Arc<dyn Translator>,
    config: EngineConfig,
}

impl SiteEditor {
    /// Create an editor over an empty site. Call [`load`](Self::load) to
    /// fetch the current one.
    pub fn new(
        registry: CollectionRegistry,
        site: Arc<dyn SiteStore>,
        assets: Arc<dyn AssetStore>,
        translator: Arc<dyn Translator>,
    ) -> Self {
        Self {
            state: SiteState::default(),
            registry,
            site,
            assets,
            translator,
            config: EngineConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from an existing state instead of loading one.
    pub fn with_state(mut self, state: SiteState) -> Self {
        self.state = state;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &SiteState {
        &self.state
    }

    /// Owned copy of the current state, e.g. for serialization.
    pub fn snapshot(&self) -> SiteState {
        self.state.clone()
    }

    /// Page title in `lang`, or in the configured default language.
    pub fn page_title(&self, page_id: &PageId, lang: Option<LanguageCode>) -> Option<String> {
        let lang = lang.unwrap_or(self.config.default_language);
        self.state
            .page(page_id)
            .map(|page| resolver::resolve(Some(&page.title), lang))
    }

    fn repository(&self, collection: Collection) -> Result<Arc<dyn ContentRepository>> {
        Ok(Arc::clone(self.registry.get(collection)?))
    }

    /// Repository for the source collection of a tag-bearing container.
    fn source_repository(
        &self,
        container_id: &ContainerId,
    ) -> Result<(Collection, Arc<dyn ContentRepository>)> {
        let container = self
            .state
            .container(container_id)
            .ok_or_else(|| ReferentialError::UnknownContainer(container_id.clone()))?;
        let source = container
            .source()
            .ok_or_else(|| ReferentialError::NotTaggable {
                container: container.id.clone(),
                kind: container.container_type(),
            })?;
        Ok((source, self.repository(source)?))
    }

    async fn persist_demotions(&self, outcome: &mut Outcome<impl Sized>, demoted: &[ContentItem]) {
        for item in demoted {
            match self.registry.get(item.collection()) {
                Ok(repository) => {
                    outcome.tolerate("update_item", repository.update_item(item).await);
                }
                Err(err) => {
                    warn!(item_id = %item.id, error = %err, "No repository for demoted item");
                    outcome.push(Warning::collaborator(
                        "update_item",
                        &CollaboratorError::Unavailable(err.to_string()),
                    ));
                }
            }
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replace the in-memory state with the persisted site.
    ///
    /// Fails without touching the current state if any collaborator fails.
    pub async fn load(&mut self) -> Result<()> {
        let pages = self.site.load_pages().await?;
        let nav = self.site.load_nav().await?;

        let mut collections = ContentStore::new();
        for collection in self.registry.collections().collect::<Vec<_>>() {
            let items = self.repository(collection)?.list_items().await?;
            collections.replace_collection(collection, items);
        }

        self.state = SiteState::new(pages, collections, NavTree::new(nav));
        info!(
            pages = self.state.pages().len(),
            nav_items = self.state.nav().items().len(),
            "Loaded site"
        );
        Ok(())
    }

    // =========================================================================
    // Tagging
    // =========================================================================

    /// Tag an existing item into a container, publishing it.
    pub async fn tag(
        &mut self,
        container_id: &ContainerId,
        item_id: &ItemId,
    ) -> Result<Outcome<Container>> {
        let (_, repository) = self.source_repository(container_id)?;
        let change = self.state.tag(container_id, item_id)?;

        let mut outcome = Outcome::new(change.container);
        if change.changed {
            let saved = self.site.save_container(&outcome.value).await;
            outcome.tolerate("save_container", saved);
        }
        if let Some(item) = &change.status_change {
            outcome.tolerate("update_item", repository.update_item(item).await);
        }
        if let Some(warning) = underfill_warning(&outcome.value) {
            outcome.push(warning);
        }

        info!(container_id = %container_id, item_id = %item_id, changed = change.changed, "Tag");
        Ok(outcome)
    }

    /// Remove an item from a container, unpublishing it if nothing else
    /// tags it.
    pub async fn untag(
        &mut self,
        container_id: &ContainerId,
        item_id: &ItemId,
    ) -> Result<Outcome<Container>> {
        let (_, repository) = self.source_repository(container_id)?;
        let change = self.state.untag(container_id, item_id)?;

        let mut outcome = Outcome::new(change.container);
        if change.changed {
            let saved = self.site.save_container(&outcome.value).await;
            outcome.tolerate("save_container", saved);
        }
        if let Some(item) = &change.status_change {
            outcome.tolerate("update_item", repository.update_item(item).await);
        }
        if let Some(warning) = underfill_warning(&outcome.value) {
            outcome.push(warning);
        }

        info!(container_id = %container_id, item_id = %item_id, changed = change.changed, "Untag");
        Ok(outcome)
    }

    /// Create an item in the container's source collection and tag it.
    ///
    /// The new item stays a draft.
    pub async fn create_and_tag(
        &mut self,
        container_id: &ContainerId,
        new_item: NewItem,
    ) -> Result<Outcome<ContentItem>> {
        let (source, repository) = self.source_repository(container_id)?;
        if new_item.collection() != source {
            return Err(ReferentialError::CollectionMismatch {
                expected: source,
                found: new_item.collection(),
            }
            .into());
        }
        validate_title(new_item.collection(), new_item.fields.display_name())?;

        let created = repository.create_item(new_item).await?;
        let container = self.state.attach_created(container_id, created.clone())?;

        let mut outcome = Outcome::new(created);
        outcome.tolerate("save_container", self.site.save_container(&container).await);
        if let Some(warning) = underfill_warning(&container) {
            outcome.push(warning);
        }

        info!(
            container_id = %container_id,
            item_id = %outcome.value.id,
            collection = %source,
            "Created and tagged item"
        );
        Ok(outcome)
    }

    /// Delete an item and purge it from every container on every page.
    ///
    /// All or nothing: the purge is saved in one batch before the item is
    /// deleted. If either step fails, the saved purge is rolled back, the
    /// in-memory state is restored and the error is returned.
    pub async fn delete_item(
        &mut self,
        collection: Collection,
        item_id: &ItemId,
    ) -> Result<ContentItem> {
        let repository = self.repository(collection)?;
        let snapshot = self.state.clone();
        let purge = self.state.purge_item(collection, item_id)?;

        if !purge.after.is_empty() {
            if let Err(err) = self.site.save_containers(&purge.after).await {
                warn!(item_id = %item_id, error = %err, "Tag purge failed, item kept");
                self.state = snapshot;
                return Err(err.into());
            }
        }

        if let Err(err) = repository.delete_item(item_id).await {
            warn!(item_id = %item_id, error = %err, "Delete failed, rolling back tag purge");
            if !purge.before.is_empty() {
                self.compensate(&purge.before).await;
            }
            self.state = snapshot;
            return Err(err.into());
        }

        info!(
            item_id = %item_id,
            collection = %collection,
            containers = purge.after.len(),
            "Deleted item"
        );
        Ok(purge.item)
    }

    /// Re-save containers as they were before a failed delete.
    async fn compensate(&self, originals: &[Container]) {
        let attempts = self.config.compensation_retries.max(1);
        for attempt in 1..=attempts {
            match self.site.save_containers(originals).await {
                Ok(()) => {
                    debug!(attempt, "Restored containers after failed delete");
                    return;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "Restoring containers failed");
                }
            }
        }
        error!(
            containers = originals.len(),
            "Could not restore containers; storage holds the purged tags"
        );
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Create a draft item without tagging it anywhere.
    pub async fn create_item(&mut self, new_item: NewItem) -> Result<ContentItem> {
        let collection = new_item.collection();
        validate_title(collection, new_item.fields.display_name())?;

        let repository = self.repository(collection)?;
        let created = repository.create_item(new_item).await?;
        self.state.collections.insert(created.clone());

        info!(item_id = %created.id, collection = %collection, "Created item");
        Ok(created)
    }

    /// Replace an item's fields and translations.
    ///
    /// The status is owned by tagging and is carried over from the current
    /// item.
    pub async fn update_item(&mut self, mut item: ContentItem) -> Result<Outcome<ContentItem>> {
        let collection = item.collection();
        validate_title(collection, item.display_name())?;
        let repository = self.repository(collection)?;

        let current = self
            .state
            .collections
            .get_mut(collection, &item.id)
            .ok_or_else(|| ReferentialError::UnknownItem {
                collection,
                id: item.id.clone(),
            })?;
        item.status = current.status;
        item.touch();
        *current = item.clone();

        let mut outcome = Outcome::new(item);
        let saved = repository.update_item(&outcome.value).await;
        outcome.tolerate("update_item", saved);
        debug!(item_id = %outcome.value.id, "Updated item");
        Ok(outcome)
    }

    /// Set an item's status by hand.
    ///
    /// Publishing is only allowed while some container tags the item;
    /// drafting a tagged item is allowed.
    pub async fn set_item_status(
        &mut self,
        collection: Collection,
        item_id: &ItemId,
        status: Status,
    ) -> Result<Outcome<ContentItem>> {
        let repository = self.repository(collection)?;
        self.state.require_item(collection, item_id)?;
        if status.is_published() && !self.state.is_tagged_anywhere(collection, item_id) {
            return Err(ValidationError::PublishUntagged {
                collection,
                id: item_id.clone(),
            }
            .into());
        }

        let changed = self.state.set_status(collection, item_id, status);
        let item = self.state.require_item(collection, item_id)?.clone();

        let mut outcome = Outcome::new(item);
        if changed.is_some() {
            let saved = repository.update_item(&outcome.value).await;
            outcome.tolerate("update_item", saved);
            info!(item_id = %item_id, status = ?status, "Set item status");
        }
        Ok(outcome)
    }

    /// Upload an image and set it as the item's image.
    pub async fn attach_item_image(
        &mut self,
        collection: Collection,
        item_id: &ItemId,
        bytes: &[u8],
        file_name: &str,
    ) -> Result<Outcome<ContentItem>> {
        let repository = self.repository(collection)?;
        let mut item = self.state.require_item(collection, item_id)?.clone();
        if item.fields.image_url_mut().is_none() {
            return Err(ValidationError::NoImageSlot(collection).into());
        }
        if bytes.is_empty() {
            return Err(ValidationError::EmptyAsset.into());
        }

        let asset = self
            .assets
            .upload_asset(bytes, file_name, collection.as_str())
            .await?;

        if let Some(slot) = item.fields.image_url_mut() {
            *slot = Some(asset.url.clone());
        }
        item.touch();
        if let Some(current) = self.state.collections.get_mut(collection, item_id) {
            *current = item.clone();
        }

        let mut outcome = Outcome::new(item);
        let saved = repository.update_item(&outcome.value).await;
        outcome.tolerate("update_item", saved);
        info!(item_id = %item_id, url = %asset.url, "Attached image");
        Ok(outcome)
    }

    // =========================================================================
    // Pages
    // =========================================================================

    pub async fn create_page(
        &mut self,
        title: MultilingualText,
        slug: &str,
    ) -> Result<Outcome<Page>> {
        if title.source_text().map_or(true, |t| t.trim().is_empty()) {
            return Err(ValidationError::EmptyPageTitle.into());
        }
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(ValidationError::EmptySlug.into());
        }
        if self.state.pages().iter().any(|p| p.slug == slug) {
            return Err(ValidationError::DuplicateSlug(slug.to_string()).into());
        }

        let page = Page::new(title, slug);
        self.state.pages.push(page.clone());

        let mut outcome = Outcome::new(page);
        let saved = self.site.save_page(&outcome.value).await;
        outcome.tolerate("save_page", saved);
        info!(page_id = %outcome.value.id, slug = %slug, "Created page");
        Ok(outcome)
    }

    /// Delete a page, its containers and its navigation nodes.
    ///
    /// Items tagged only by the removed containers are unpublished.
    pub async fn delete_page(&mut self, page_id: &PageId) -> Result<Outcome<Page>> {
        let index = self.state.page_index(page_id)?;
        let page = self.state.pages.remove(index);

        let released: Vec<_> = page.containers.iter().flat_map(held_tags).collect();
        let demoted = self.state.release_tags(&released);
        let detached = self.state.nav.detach_page(page_id);

        let mut outcome = Outcome::new(page);
        outcome.tolerate("delete_page", self.site.delete_page(page_id).await);
        self.persist_demotions(&mut outcome, &demoted).await;
        if !detached.is_empty() {
            outcome.tolerate(
                "persist_nav_tree",
                self.site.persist_nav_tree(self.state.nav.items()).await,
            );
        }

        info!(
            page_id = %page_id,
            demoted = demoted.len(),
            detached = detached.len(),
            "Deleted page"
        );
        Ok(outcome)
    }

    pub async fn set_page_status(&mut self, page_id: &PageId, status: Status) -> Result<Outcome<Page>> {
        let index = self.state.page_index(page_id)?;
        let page = &mut self.state.pages[index];
        let changed = page.status != status;
        if changed {
            page.status = status;
            page.touch();
        }

        let mut outcome = Outcome::new(page.clone());
        if changed {
            let saved = self.site.save_page(&outcome.value).await;
            outcome.tolerate("save_page", saved);
            info!(page_id = %page_id, status = ?status, "Set page status");
        }
        Ok(outcome)
    }

    // =========================================================================
    // Containers
    // =========================================================================

    /// Append a container to the end of a page.
    ///
    /// Data containers (slider, card grid, table) need a source collection.
    pub async fn add_container(
        &mut self,
        page_id: &PageId,
        kind: ContainerType,
        source: Option<Collection>,
    ) -> Result<Outcome<Container>> {
        let settings = ContainerSettings::for_type(kind, source)
            .ok_or(ValidationError::MissingSource(kind))?;
        if let Some(source) = settings.tagged_source().map(|t| t.source) {
            self.registry.get(source)?;
        }

        let index = self.state.page_index(page_id)?;
        let page = &mut self.state.pages[index];
        let container = Container::new(page_id.clone(), page.next_order(), settings);
        page.containers.push(container.clone());

        let mut outcome = Outcome::new(container);
        let saved = self.site.save_container(&outcome.value).await;
        outcome.tolerate("save_container", saved);
        if let Some(warning) = underfill_warning(&outcome.value) {
            outcome.push(warning);
        }

        info!(page_id = %page_id, container_id = %outcome.value.id, kind = %kind, "Added container");
        Ok(outcome)
    }

    /// Remove a container and close the gap in its page's order.
    ///
    /// Items tagged only by this container are unpublished.
    pub async fn remove_container(&mut self, container_id: &ContainerId) -> Result<Outcome<Container>> {
        let slot = self.state.locate(container_id)?;
        let page = &mut self.state.pages[slot.page];
        let removed = page.containers.remove(slot.container);
        let reindexed = ordering::reindex(page.containers.iter_mut());
        let page_id = page.id.clone();
        let remaining = page.containers.clone();

        let demoted = self.state.release_tags(&held_tags(&removed));

        let mut outcome = Outcome::new(removed);
        outcome.tolerate("delete_container", self.site.delete_container(container_id).await);
        if reindexed {
            outcome.tolerate(
                "persist_page_order",
                self.site.persist_page_order(&page_id, &remaining).await,
            );
        }
        self.persist_demotions(&mut outcome, &demoted).await;

        info!(container_id = %container_id, demoted = demoted.len(), "Removed container");
        Ok(outcome)
    }

    pub async fn set_container_visibility(
        &mut self,
        container_id: &ContainerId,
        visible: bool,
    ) -> Result<Outcome<Container>> {
        let slot = self.state.locate(container_id)?;
        let container = self.state.container_at_mut(slot);
        let changed = container.is_visible != visible;
        container.is_visible = visible;

        let mut outcome = Outcome::new(container.clone());
        if changed {
            let saved = self.site.save_container(&outcome.value).await;
            outcome.tolerate("save_container", saved);
        }
        Ok(outcome)
    }

    /// Set one free-form content field of a container (heading, body, ...).
    pub async fn set_container_content(
        &mut self,
        container_id: &ContainerId,
        key: &str,
        text: MultilingualText,
    ) -> Result<Outcome<Container>> {
        let slot = self.state.locate(container_id)?;
        let container = self.state.container_at_mut(slot);
        container.content.insert(key.to_string(), text);

        let mut outcome = Outcome::new(container.clone());
        let saved = self.site.save_container(&outcome.value).await;
        outcome.tolerate("save_container", saved);
        debug!(container_id = %container_id, key, "Set container content");
        Ok(outcome)
    }

    /// Drag a container to `new_index` on its page.
    ///
    /// Persists the whole page order in one call; moving to the current
    /// index persists nothing.
    pub async fn reorder_container(
        &mut self,
        container_id: &ContainerId,
        new_index: usize,
    ) -> Result<Outcome<Reorder>> {
        let slot = self.state.locate(container_id)?;
        let page = &mut self.state.pages[slot.page];
        let result = ordering::reorder(page.containers.iter_mut(), container_id, new_index);

        let mut outcome = Outcome::new(result);
        if let Reorder::Moved { from, to } = result {
            page.sort_containers();
            let page_id = page.id.clone();
            let containers = page.containers.clone();
            outcome.tolerate(
                "persist_page_order",
                self.site.persist_page_order(&page_id, &containers).await,
            );
            info!(container_id = %container_id, from, to, "Reordered container");
        }
        Ok(outcome)
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Drag a navigation node to `new_index` among its siblings.
    pub async fn reorder_nav_item(
        &mut self,
        nav_item_id: &NavItemId,
        new_index: usize,
    ) -> Result<Outcome<Reorder>> {
        let result = self.state.nav.reorder(nav_item_id, new_index)?;

        let mut outcome = Outcome::new(result);
        if let Reorder::Moved { from, to } = result {
            outcome.tolerate(
                "persist_nav_tree",
                self.site.persist_nav_tree(self.state.nav.items()).await,
            );
            info!(nav_item_id = %nav_item_id, from, to, "Reordered navigation node");
        }
        Ok(outcome)
    }

    /// Move a navigation node under a new parent.
    pub async fn move_nav_item(
        &mut self,
        nav_item_id: &NavItemId,
        new_parent: NavParent,
    ) -> Result<Outcome<bool>> {
        let moved = self.state.nav.move_item(nav_item_id, new_parent)?;

        let mut outcome = Outcome::new(moved);
        if moved {
            outcome.tolerate(
                "persist_nav_tree",
                self.site.persist_nav_tree(self.state.nav.items()).await,
            );
            info!(nav_item_id = %nav_item_id, "Moved navigation node");
        }
        Ok(outcome)
    }

    /// Give a page without a navigation node one, labelled with its title.
    pub async fn attach_orphan_page(
        &mut self,
        page_id: &PageId,
        parent: NavParent,
    ) -> Result<Outcome<NavItemId>> {
        let label = self
            .state
            .page(page_id)
            .map(|page| page.title.clone())
            .ok_or_else(|| ReferentialError::UnknownPage(page_id.clone()))?;
        let id = self.state.nav.attach_page(page_id.clone(), label, parent)?;

        let mut outcome = Outcome::new(id);
        outcome.tolerate(
            "persist_nav_tree",
            self.site.persist_nav_tree(self.state.nav.items()).await,
        );
        info!(page_id = %page_id, nav_item_id = %outcome.value, "Attached page to navigation");
        Ok(outcome)
    }

    /// Remove a navigation node. The page itself is kept.
    pub async fn detach_nav_item(&mut self, nav_item_id: &NavItemId) -> Result<Outcome<NavItem>> {
        let removed = self.state.nav.detach(nav_item_id)?;

        let mut outcome = Outcome::new(removed);
        outcome.tolerate(
            "persist_nav_tree",
            self.site.persist_nav_tree(self.state.nav.items()).await,
        );
        info!(nav_item_id = %nav_item_id, "Detached navigation node");
        Ok(outcome)
    }

    /// Pages no navigation node references.
    pub fn orphan_pages(&self) -> Vec<PageId> {
        self.state
            .nav
            .orphan_pages(self.state.pages().iter().map(|p| &p.id))
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Fill missing translations of `target` with machine suggestions.
    ///
    /// Calls the translator one field and language at a time. A failed or
    /// empty suggestion leaves the field unset and adds a warning. Returns
    /// how many values were written.
    pub async fn suggest_translations(
        &mut self,
        target: &TranslationTarget,
    ) -> Result<Outcome<usize>> {
        let repository = match target {
            TranslationTarget::Item { collection, .. } => Some(self.repository(*collection)?),
            _ => None,
        };
        let languages: Vec<LanguageCode> = self.config.target_languages().collect();
        let jobs = self
            .state
            .translation_jobs(target, &languages, self.config.overwrite_translations)?;

        let mut outcome = Outcome::new(0);
        for job in jobs {
            match self.translator.translate(&job.source_text, job.language).await {
                Ok(text) if !text.trim().is_empty() => {
                    self.state
                        .apply_translation(target, &job.field, job.language, &text)?;
                    outcome.value += 1;
                }
                result => {
                    if let Err(err) = result {
                        debug!(field = %job.field, language = %job.language, error = %err, "Translation failed");
                    }
                    outcome.push(Warning::TranslationMissing {
                        field: job.field,
                        language: job.language,
                    });
                }
            }
        }

        if outcome.value > 0 {
            let saved = match target {
                TranslationTarget::Item { collection, id } => {
                    let item = self.state.require_item(*collection, id)?;
                    match &repository {
                        Some(repository) => repository.update_item(item).await,
                        None => Ok(()),
                    }
                }
                TranslationTarget::ContainerContent(container_id) => {
                    let container = self.state.container_at(self.state.locate(container_id)?);
                    self.site.save_container(container).await
                }
                TranslationTarget::PageTitle(page_id) => {
                    let page = &self.state.pages[self.state.page_index(page_id)?];
                    self.site.save_page(page).await
                }
            };
            outcome.tolerate("save_translations", saved);
        }

        info!(
            target = ?target,
            applied = outcome.value,
            missing = outcome.warnings.len(),
            "Suggested translations"
        );
        Ok(outcome)
    }
}

fn validate_title(collection: Collection, title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle { collection }.into());
    }
    Ok(())
}
