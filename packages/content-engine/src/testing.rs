//! Testing utilities: a scriptable translator and a small sample site.
//!
//! These are useful for testing applications that drive the engine without
//! a real translation service or storage.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::error::{CollaboratorError, CollaboratorResult};
use crate::navigation::NavTree;
use crate::state::SiteState;
use crate::store::ContentStore;
use crate::stores::memory::MemoryBackend;
use crate::traits::translator::Translator;
use crate::types::{
    container::{
        CardGridSettings, Container, ContainerSettings, HeroSettings, SliderSettings, TaggedSource,
    },
    id::{ContainerId, ItemId, NavItemId, PageId},
    item::{Collection, ContactFields, ContentItem, ItemFields, NewsFields},
    language::LanguageCode,
    nav::{NavItem, NavParent},
    page::Page,
    text::MultilingualText,
};

/// A mock translator for testing.
///
/// Answers `"[lang] text"` unless a response was scripted. Individual
/// source texts can be delayed or made to fail, and the peak number of
/// overlapping calls is tracked.
#[derive(Debug, Clone, Default)]
pub struct MockTranslator {
    /// Scripted responses by (source text, target language)
    responses: Arc<RwLock<HashMap<(String, LanguageCode), String>>>,

    /// Artificial latency by source text
    delays: Arc<RwLock<HashMap<String, Duration>>>,

    /// Source texts that fail
    failures: Arc<RwLock<HashSet<String>>>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<TranslateCall>>>,

    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

/// Record of a call made to the mock translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateCall {
    pub text: String,
    pub language: LanguageCode,
}

impl MockTranslator {
    /// Create a new mock translator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the answer for one text and language. An empty answer counts
    /// as "no suggestion".
    pub fn with_response(
        self,
        text: impl Into<String>,
        language: LanguageCode,
        response: impl Into<String>,
    ) -> Self {
        self.responses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((text.into(), language), response.into());
        self
    }

    /// Delay every translation of `text`.
    pub fn with_delay(self, text: impl Into<String>, delay: Duration) -> Self {
        self.delays
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(text.into(), delay);
        self
    }

    /// Fail every translation of `text`.
    pub fn fail_text(self, text: impl Into<String>) -> Self {
        self.failures
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(text.into());
        self
    }

    /// Get all calls made to this mock, in the order they started.
    pub fn calls(&self) -> Vec<TranslateCall> {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Most calls that were ever running at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, target: LanguageCode) -> CollaboratorResult<String> {
        self.calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TranslateCall {
                text: text.to_string(),
                language: target,
            });

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        let delay = self
            .delays
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(text)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self
            .failures
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(text)
        {
            return Err(CollaboratorError::Unavailable("mock translator refused".into()));
        }

        let scripted = self
            .responses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(text.to_string(), target))
            .cloned();
        Ok(scripted.unwrap_or_else(|| format!("[{target}] {text}")))
    }
}

// =============================================================================
// Sample site
// =============================================================================

pub const HOME: &str = "home";
pub const ABOUT: &str = "about";
/// Card grid of news on the home page, 3 columns.
pub const GRID_A: &str = "grid-a";
/// News slider on the home page, 1 column.
pub const SLIDER_B: &str = "slider-b";
/// Card grid of news on the about page, 2 columns.
pub const GRID_C: &str = "grid-c";
pub const HERO: &str = "hero";
pub const NAV_HOME: &str = "nav-home";
pub const NEWS_1: &str = "news-1";
pub const NEWS_2: &str = "news-2";
pub const NEWS_3: &str = "news-3";
pub const CONTACT_1: &str = "contact-1";

/// A draft news item.
pub fn news(id: &str, title: &str) -> ContentItem {
    ContentItem::draft(
        ItemId::from(id),
        ItemFields::News(NewsFields {
            title: title.to_string(),
            summary: format!("{title} summary"),
            ..Default::default()
        }),
    )
}

fn card_grid(id: &str, page: &str, order: i32, columns: usize) -> Container {
    let mut container = Container::new(
        PageId::from(page),
        order,
        ContainerSettings::CardGrid(CardGridSettings {
            tags: TaggedSource::new(Collection::News),
            columns,
        }),
    );
    container.id = ContainerId::from(id);
    container
}

fn sample_pages() -> Vec<Page> {
    let mut home = Page::new(MultilingualText::en("Home").with(LanguageCode::De, "Startseite"), HOME);
    home.id = PageId::from(HOME);
    let mut slider = Container::new(
        home.id.clone(),
        1,
        ContainerSettings::Slider(SliderSettings {
            tags: TaggedSource::new(Collection::News),
            columns: 1,
            autoplay: true,
        }),
    );
    slider.id = ContainerId::from(SLIDER_B);
    home.containers = vec![card_grid(GRID_A, HOME, 0, 3), slider];

    let mut about = Page::new(MultilingualText::plain("About us"), ABOUT);
    about.id = PageId::from(ABOUT);
    let mut hero = Container::new(
        about.id.clone(),
        1,
        ContainerSettings::Hero(HeroSettings::default()),
    );
    hero.id = ContainerId::from(HERO);
    hero.content
        .insert("heading".into(), MultilingualText::en("Who we are"));
    about.containers = vec![card_grid(GRID_C, ABOUT, 0, 2), hero];

    vec![home, about]
}

fn sample_items() -> Vec<ContentItem> {
    vec![
        news(NEWS_1, "Spring fair"),
        news(NEWS_2, "New opening hours"),
        news(NEWS_3, "Volunteers wanted"),
        ContentItem::draft(
            ItemId::from(CONTACT_1),
            ItemFields::Contact(ContactFields {
                full_name: "Ada Byrne".into(),
                position: "Coordinator".into(),
                ..Default::default()
            }),
        ),
    ]
}

fn sample_nav() -> Vec<NavItem> {
    let mut home = NavItem::for_page(PageId::from(HOME), "Home".into(), NavParent::Root, 0);
    home.id = NavItemId::from(NAV_HOME);
    vec![home]
}

/// Two pages with nothing tagged yet.
///
/// `home` holds [`GRID_A`] and [`SLIDER_B`]; `about` holds [`GRID_C`] and
/// [`HERO`] and has no navigation node.
pub fn sample_site() -> SiteState {
    let mut store = ContentStore::new();
    for item in sample_items() {
        store.insert(item);
    }
    SiteState::new(sample_pages(), store, NavTree::new(sample_nav()))
}

/// A backend holding the same data as [`sample_site`].
pub fn seeded_backend() -> MemoryBackend {
    let mut backend = MemoryBackend::new()
        .with_items(sample_items())
        .with_nav(sample_nav());
    for page in sample_pages() {
        backend = backend.with_page(page);
    }
    backend
}
