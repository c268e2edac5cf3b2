//! Consistency checks over a loaded site.
//!
//! The engine keeps these properties as long as every change goes through
//! it; `audit` finds where stored data has drifted anyway.

use serde::Serialize;
use std::collections::HashSet;

use crate::navigation::NavProblem;
use crate::state::SiteState;
use crate::types::id::{ContainerId, ItemId, NavItemId, PageId};
use crate::types::item::Collection;

/// One inconsistency found by [`audit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// A container tags an id missing from its source collection.
    DanglingTag {
        container: ContainerId,
        source: Collection,
        item: ItemId,
    },
    /// The same id appears twice in one container.
    DuplicateTag { container: ContainerId, item: ItemId },
    /// A container's `pageId` disagrees with the page holding it.
    MisplacedContainer {
        container: ContainerId,
        page: PageId,
        claimed: PageId,
    },
    /// A published item no container tags.
    PublishedUntagged { collection: Collection, item: ItemId },
    DuplicateSlug { slug: String, pages: Vec<PageId> },
    /// A navigation node points at a page that does not exist.
    MissingPage { nav_item: NavItemId, page: PageId },
    Navigation(NavProblem),
    UnderFilled {
        container: ContainerId,
        tagged: usize,
        columns: usize,
    },
    OrphanPage { page: PageId },
}

impl Finding {
    /// Advisory findings describe a valid but probably unfinished site.
    pub fn is_advisory(&self) -> bool {
        matches!(self, Finding::UnderFilled { .. } | Finding::OrphanPage { .. })
    }
}

/// Check a site for broken references and publish-state drift.
pub fn audit(state: &SiteState) -> Vec<Finding> {
    let mut findings = Vec::new();

    for page in state.pages() {
        for container in &page.containers {
            if container.page_id != page.id {
                findings.push(Finding::MisplacedContainer {
                    container: container.id.clone(),
                    page: page.id.clone(),
                    claimed: container.page_id.clone(),
                });
            }

            if let Some(tags) = container.settings.tagged_source() {
                let mut seen = HashSet::new();
                for item in &tags.tagged_items {
                    if !seen.insert(item) {
                        findings.push(Finding::DuplicateTag {
                            container: container.id.clone(),
                            item: item.clone(),
                        });
                    } else if !state.collections().contains(tags.source, item) {
                        findings.push(Finding::DanglingTag {
                            container: container.id.clone(),
                            source: tags.source,
                            item: item.clone(),
                        });
                    }
                }
            }

            if let Some((tagged, columns)) = container.underfill() {
                findings.push(Finding::UnderFilled {
                    container: container.id.clone(),
                    tagged,
                    columns,
                });
            }
        }
    }

    for item in state.collections().all_items() {
        if item.is_published() && !state.is_tagged_anywhere(item.collection(), &item.id) {
            findings.push(Finding::PublishedUntagged {
                collection: item.collection(),
                item: item.id.clone(),
            });
        }
    }

    let mut slugs: Vec<(&str, Vec<PageId>)> = Vec::new();
    for page in state.pages() {
        match slugs.iter_mut().find(|(slug, _)| *slug == page.slug) {
            Some((_, pages)) => pages.push(page.id.clone()),
            None => slugs.push((&page.slug, vec![page.id.clone()])),
        }
    }
    findings.extend(
        slugs
            .into_iter()
            .filter(|(_, pages)| pages.len() > 1)
            .map(|(slug, pages)| Finding::DuplicateSlug {
                slug: slug.to_string(),
                pages,
            }),
    );

    for node in state.nav().items() {
        if let Some(page) = &node.page_id {
            if state.page(page).is_none() {
                findings.push(Finding::MissingPage {
                    nav_item: node.id.clone(),
                    page: page.clone(),
                });
            }
        }
    }
    findings.extend(state.nav().problems().into_iter().map(Finding::Navigation));

    findings.extend(
        state
            .nav()
            .orphan_pages(state.pages().iter().map(|p| &p.id))
            .into_iter()
            .map(|page| Finding::OrphanPage { page }),
    );

    findings
}
