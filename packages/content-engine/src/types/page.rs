//! Pages and the containers they own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::container::Container;
use super::id::{ContainerId, PageId};
use super::item::Status;
use super::text::MultilingualText;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub title: MultilingualText,
    pub slug: String,
    #[serde(default)]
    pub status: Status,
    /// Owned containers, kept sorted by `order`.
    #[serde(default)]
    pub containers: Vec<Container>,
    pub modified_at: DateTime<Utc>,
}

impl Page {
    pub fn new(title: MultilingualText, slug: impl Into<String>) -> Self {
        Self {
            id: PageId::generate(),
            title,
            slug: slug.into(),
            status: Status::Draft,
            containers: Vec::new(),
            modified_at: Utc::now(),
        }
    }

    pub fn container(&self, id: &ContainerId) -> Option<&Container> {
        self.containers.iter().find(|c| &c.id == id)
    }

    pub fn container_mut(&mut self, id: &ContainerId) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| &c.id == id)
    }

    /// Next free `order` value, one past the current maximum.
    pub fn next_order(&self) -> i32 {
        self.containers
            .iter()
            .map(|c| c.order)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Stable sort by `order`; ties keep insertion order.
    pub fn sort_containers(&mut self) {
        self.containers.sort_by_key(|c| c.order);
    }

    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}
