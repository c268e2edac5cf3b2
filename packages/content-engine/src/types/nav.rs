//! Navigation nodes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::{NavItemId, PageId};
use super::text::MultilingualText;

/// Literal parent id of top-level navigation nodes.
pub const ROOT_SENTINEL: &str = "root";

/// Parent of a navigation node: the tree root or another node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavParent {
    Root,
    Item(NavItemId),
}

impl NavParent {
    pub fn item(&self) -> Option<&NavItemId> {
        match self {
            NavParent::Root => None,
            NavParent::Item(id) => Some(id),
        }
    }
}

impl From<NavItemId> for NavParent {
    fn from(id: NavItemId) -> Self {
        NavParent::Item(id)
    }
}

impl Serialize for NavParent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NavParent::Root => serializer.serialize_str(ROOT_SENTINEL),
            NavParent::Item(id) => serializer.serialize_str(id.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for NavParent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == ROOT_SENTINEL || raw.is_empty() {
            Ok(NavParent::Root)
        } else {
            Ok(NavParent::Item(NavItemId::new(raw)))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub id: NavItemId,
    #[serde(rename = "parentId")]
    pub parent: NavParent,
    /// Set for page nodes; `None` for external links and group headings.
    #[serde(default)]
    pub page_id: Option<PageId>,
    pub label: MultilingualText,
    #[serde(default)]
    pub url: Option<String>,
    pub order: i32,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

impl NavItem {
    /// A node pointing at a page.
    pub fn for_page(page_id: PageId, label: MultilingualText, parent: NavParent, order: i32) -> Self {
        Self {
            id: NavItemId::generate(),
            parent,
            page_id: Some(page_id),
            label,
            url: None,
            order,
            is_visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_sentinel_round_trip() {
        let json = r#"{"id":"n1","parentId":"root","label":"Home","order":0}"#;
        let item: NavItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.parent, NavParent::Root);
        assert!(item.is_visible);

        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["parentId"], "root");
    }
}
