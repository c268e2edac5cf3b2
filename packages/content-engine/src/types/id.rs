//! Typed string identifiers for site entities.
//!
//! Storage backends hand out opaque string ids (list item ids, page ids).
//! `Id<T>` wraps that string with a phantom entity marker so an `ItemId` can
//! never be passed where a `ContainerId` is expected.
//!
//! # Example
//!
//! ```rust
//! use content_engine::types::id::{ContainerId, ItemId};
//!
//! let item = ItemId::from("42");
//! let container = ContainerId::generate();
//!
//! assert_eq!(item.as_str(), "42");
//! assert!(!container.as_str().is_empty());
//! // let wrong: ContainerId = item; // compile error
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

/// A typed wrapper around a storage id string.
#[repr(transparent)]
pub struct Id<T>(String, PhantomData<fn() -> T>);

/// Marker type for content collection items.
pub struct Item;

/// Marker type for page containers.
pub struct ContainerMarker;

/// Marker type for pages.
pub struct PageMarker;

/// Marker type for navigation nodes.
pub struct NavItemMarker;

/// Typed ID for content collection items.
pub type ItemId = Id<Item>;

/// Typed ID for containers.
pub type ContainerId = Id<ContainerMarker>;

/// Typed ID for pages.
pub type PageId = Id<PageMarker>;

/// Typed ID for navigation nodes.
pub type NavItemId = Id<NavItemMarker>;

impl<T> Id<T> {
    /// Wrap an existing storage id.
    #[inline]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into(), PhantomData)
    }

    /// Mint a fresh id (UUID v4) for a locally created entity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string(), PhantomData)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` for the empty id, which backends treat as "unassigned".
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.0).finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> From<&str> for Id<T> {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<T> From<String> for Id<T> {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ItemId::generate();
        let b = ItemId::generate();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = PageId::from("page-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"page-7\"");

        let back: PageId = serde_json::from_str("\"page-7\"").unwrap();
        assert_eq!(back, id);
    }
}
