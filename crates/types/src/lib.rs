//! Shared type definitions for the navtree workspace.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod config;
pub mod menu;
pub mod navigation;

pub use config::{AttributeMapping, WidgetConfig};
pub use menu::{MENU_NAME_PLACEHOLDER, MenuClickEvent, MenuRecord, MenuTreeNode};
pub use navigation::{LoadPhase, NavigationLayout, NavigationPosition, NavigationState};

/// Named-attribute lookup over an opaque host object.
///
/// The host data source exposes each entity through this contract; the normalizer
/// never inspects anything beyond the object id and attribute values.
pub trait AttributeSource {
    /// Identifier the host assigned to the object (used to resolve associations).
    fn object_id(&self) -> &str;

    /// Value of the named attribute, `None` when the object does not carry it.
    fn attribute(&self, name: &str) -> Option<&Value>;
}

/// Plain raw object as exported from the host: an id plus an ordered attribute bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObject {
    pub id: String,
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
}

impl RawObject {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Adds an attribute, replacing any previous value under the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl AttributeSource for RawObject {
    fn object_id(&self) -> &str {
        &self.id
    }

    fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_object_reads_from_json_export() {
        let object: RawObject = serde_json::from_value(json!({
            "id": "guid-1",
            "attributes": { "MenuId": "M1", "Depth": 0 }
        }))
        .unwrap();

        assert_eq!(object.object_id(), "guid-1");
        assert_eq!(object.attribute("MenuId"), Some(&json!("M1")));
        assert!(object.attribute("SortNo").is_none());
    }
}
