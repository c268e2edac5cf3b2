//! Drag-reorder over ordered sibling lists.
//!
//! Siblings are sorted by `order` (ties keep insertion order), the moved
//! element is spliced to its new index, and every sibling gets
//! `order = index`. Elements are addressed by key so a drop stays correct
//! even if the list changed since the drag started.

use crate::types::container::Container;
use crate::types::id::{ContainerId, NavItemId};
use crate::types::nav::NavItem;

/// An element with a persisted sort position.
pub trait Ordered {
    type Key: PartialEq;

    fn key(&self) -> &Self::Key;
    fn order(&self) -> i32;
    fn set_order(&mut self, order: i32);
}

impl Ordered for Container {
    type Key = ContainerId;

    fn key(&self) -> &ContainerId {
        &self.id
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

impl Ordered for NavItem {
    type Key = NavItemId;

    fn key(&self) -> &NavItemId {
        &self.id
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

/// Outcome of a [`reorder`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reorder {
    /// The moved element was not among the siblings.
    NotFound,
    /// Already at the requested index; nothing changed.
    Unchanged,
    /// Siblings were re-indexed to `0..N-1`.
    Moved { from: usize, to: usize },
}

/// Move the element keyed `moved` to `new_index` among `siblings`.
///
/// An index past the end moves the element last.
pub fn reorder<'a, T, I>(siblings: I, moved: &T::Key, new_index: usize) -> Reorder
where
    T: Ordered + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    let mut sequence: Vec<&mut T> = siblings.into_iter().collect();
    sequence.sort_by_key(|item| item.order());

    let Some(from) = sequence.iter().position(|item| item.key() == moved) else {
        return Reorder::NotFound;
    };
    let to = new_index.min(sequence.len() - 1);
    if from == to {
        return Reorder::Unchanged;
    }

    let element = sequence.remove(from);
    sequence.insert(to, element);
    assign_dense(&mut sequence);

    Reorder::Moved { from, to }
}

/// Re-number siblings to `0..N-1`, keeping their relative order.
///
/// Returns `true` if any `order` value changed.
pub fn reindex<'a, T, I>(siblings: I) -> bool
where
    T: Ordered + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    let mut sequence: Vec<&mut T> = siblings.into_iter().collect();
    sequence.sort_by_key(|item| item.order());
    assign_dense(&mut sequence)
}

fn assign_dense<T: Ordered>(sequence: &mut [&mut T]) -> bool {
    let mut changed = false;
    for (index, item) in sequence.iter_mut().enumerate() {
        let order = index as i32;
        if item.order() != order {
            item.set_order(order);
            changed = true;
        }
    }
    changed
}
