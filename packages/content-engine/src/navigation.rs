//! Navigation tree rooted at the `"root"` sentinel.
//!
//! Independent of container order: nodes reference pages by id, and a page
//! without any node is an orphan.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ReferentialError;
use crate::ordering::{self, Reorder};
use crate::types::id::{NavItemId, PageId};
use crate::types::nav::{NavItem, NavParent};
use crate::types::text::MultilingualText;

/// Flat list of navigation nodes forming a tree via `parent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavTree {
    items: Vec<NavItem>,
}

/// A structural defect found by [`NavTree::problems`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum NavProblem {
    MissingParent { item: NavItemId, parent: NavItemId },
    Cycle { item: NavItemId },
}

impl NavTree {
    pub fn new(items: Vec<NavItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn get(&self, id: &NavItemId) -> Option<&NavItem> {
        self.items.iter().find(|n| &n.id == id)
    }

    fn get_mut(&mut self, id: &NavItemId) -> Option<&mut NavItem> {
        self.items.iter_mut().find(|n| &n.id == id)
    }

    fn require(&self, id: &NavItemId) -> Result<&NavItem, ReferentialError> {
        self.get(id)
            .ok_or_else(|| ReferentialError::UnknownNavItem(id.clone()))
    }

    fn require_parent(&self, parent: &NavParent) -> Result<(), ReferentialError> {
        match parent {
            NavParent::Root => Ok(()),
            NavParent::Item(id) => self.require(id).map(|_| ()),
        }
    }

    /// Children of `parent`, sorted by `order`.
    pub fn children(&self, parent: &NavParent) -> Vec<&NavItem> {
        let mut children: Vec<_> = self.items.iter().filter(|n| &n.parent == parent).collect();
        children.sort_by_key(|n| n.order);
        children
    }

    fn next_order(&self, parent: &NavParent) -> i32 {
        self.items
            .iter()
            .filter(|n| &n.parent == parent)
            .map(|n| n.order)
            .max()
            .map_or(0, |max| max + 1)
    }

    fn reindex_children(&mut self, parent: &NavParent) {
        ordering::reindex(self.items.iter_mut().filter(|n| &n.parent == parent));
    }

    /// Returns `true` if `candidate` is `ancestor` or sits anywhere below it.
    pub fn is_descendant_or_self(&self, candidate: &NavItemId, ancestor: &NavItemId) -> bool {
        let mut visited = HashSet::new();
        let mut current = Some(candidate.clone());

        while let Some(id) = current {
            if &id == ancestor {
                return true;
            }
            if !visited.insert(id.clone()) {
                // Corrupt input with a cycle; stop walking.
                return false;
            }
            current = self.get(&id).and_then(|n| n.parent.item().cloned());
        }
        false
    }

    /// Reparent `id` under `new_parent`, appending it after the new
    /// siblings.
    ///
    /// Rejects unknown nodes and moves that would put a node inside its own
    /// subtree. Returns `false` if the node already sits under that parent.
    pub fn move_item(
        &mut self,
        id: &NavItemId,
        new_parent: NavParent,
    ) -> Result<bool, ReferentialError> {
        let old_parent = self.require(id)?.parent.clone();
        self.require_parent(&new_parent)?;

        if let NavParent::Item(parent_id) = &new_parent {
            if self.is_descendant_or_self(parent_id, id) {
                return Err(ReferentialError::NavCycle {
                    item: id.clone(),
                    parent: parent_id.clone(),
                });
            }
        }

        if old_parent == new_parent {
            return Ok(false);
        }

        let order = self.next_order(&new_parent);
        if let Some(node) = self.get_mut(id) {
            node.parent = new_parent;
            node.order = order;
        }
        self.reindex_children(&old_parent);
        Ok(true)
    }

    /// Move `id` to `new_index` among its siblings.
    pub fn reorder(&mut self, id: &NavItemId, new_index: usize) -> Result<Reorder, ReferentialError> {
        let parent = self.require(id)?.parent.clone();
        Ok(ordering::reorder(
            self.items.iter_mut().filter(|n| n.parent == parent),
            id,
            new_index,
        ))
    }

    /// Returns `true` if any node points at `page_id`.
    pub fn references_page(&self, page_id: &PageId) -> bool {
        self.items.iter().any(|n| n.page_id.as_ref() == Some(page_id))
    }

    /// Create a node for a page that has none yet.
    pub fn attach_page(
        &mut self,
        page_id: PageId,
        label: MultilingualText,
        parent: NavParent,
    ) -> Result<NavItemId, ReferentialError> {
        if self.references_page(&page_id) {
            return Err(ReferentialError::PageAlreadyInNav(page_id));
        }
        self.require_parent(&parent)?;

        let order = self.next_order(&parent);
        let node = NavItem::for_page(page_id, label, parent, order);
        let id = node.id.clone();
        self.items.push(node);
        Ok(id)
    }

    /// Remove a node without touching its page.
    ///
    /// Children move up to the removed node's parent, after its remaining
    /// siblings, keeping their relative order.
    pub fn detach(&mut self, id: &NavItemId) -> Result<NavItem, ReferentialError> {
        let position = self
            .items
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| ReferentialError::UnknownNavItem(id.clone()))?;
        let removed = self.items.remove(position);
        let orphaned_parent = NavParent::Item(removed.id.clone());

        let base = self.next_order(&removed.parent);
        let mut children: Vec<&mut NavItem> = self
            .items
            .iter_mut()
            .filter(|n| n.parent == orphaned_parent)
            .collect();
        children.sort_by_key(|n| n.order);
        for (offset, child) in children.into_iter().enumerate() {
            child.parent = removed.parent.clone();
            child.order = base + offset as i32;
        }

        self.reindex_children(&removed.parent);
        Ok(removed)
    }

    /// Detach every node pointing at `page_id`.
    pub fn detach_page(&mut self, page_id: &PageId) -> Vec<NavItem> {
        let ids: Vec<NavItemId> = self
            .items
            .iter()
            .filter(|n| n.page_id.as_ref() == Some(page_id))
            .map(|n| n.id.clone())
            .collect();

        ids.iter().filter_map(|id| self.detach(id).ok()).collect()
    }

    /// Pages from `pages` that no node references, in input order.
    pub fn orphan_pages<'a>(&self, pages: impl IntoIterator<Item = &'a PageId>) -> Vec<PageId> {
        let referenced: HashSet<&PageId> =
            self.items.iter().filter_map(|n| n.page_id.as_ref()).collect();
        pages
            .into_iter()
            .filter(|id| !referenced.contains(id))
            .cloned()
            .collect()
    }

    /// Missing parents and cycles, for auditing loaded data.
    pub fn problems(&self) -> Vec<NavProblem> {
        let mut problems = Vec::new();
        for node in &self.items {
            let Some(parent) = node.parent.item() else {
                continue;
            };
            if self.get(parent).is_none() {
                problems.push(NavProblem::MissingParent {
                    item: node.id.clone(),
                    parent: parent.clone(),
                });
            } else if !self.reaches_root(&node.id) {
                problems.push(NavProblem::Cycle {
                    item: node.id.clone(),
                });
            }
        }
        problems
    }

    fn reaches_root(&self, id: &NavItemId) -> bool {
        let mut visited = HashSet::new();
        let mut current = id.clone();
        loop {
            if !visited.insert(current.clone()) {
                return false;
            }
            match self.get(&current).map(|n| &n.parent) {
                Some(NavParent::Root) => return true,
                Some(NavParent::Item(parent)) => current = parent.clone(),
                None => return false,
            }
        }
    }
}
