//! Menu record and tree node definitions shared by the engine, the stores, and the CLI.
//!
//! Field names serialize in the platform's camelCase shape (`menuId`, `sortNo`,
//! `enabledTF`, `pageURL`) so persisted caches and fixtures read the same way the
//! host data source exposes them.

use serde::{Deserialize, Serialize};

/// Label used when a menu record carries no display name.
pub const MENU_NAME_PLACEHOLDER: &str = "Menu";

/// Flat menu record produced by the normalizer from one raw menu entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    /// Unique identifier; the tree identity key.
    pub menu_id: String,
    /// Display label.
    #[serde(default)]
    pub menu_name: String,
    /// Identifier of the parent menu, `None` for roots.
    #[serde(default)]
    pub parent_menu_id: Option<String>,
    /// Advisory nesting depth reported by the source.
    #[serde(default)]
    pub depth: u32,
    /// Sibling sort key.
    #[serde(default)]
    pub sort_no: f64,
    /// Visibility flag; absent or `"Y"` means visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_yn: Option<String>,
    /// `false` excludes the record from the tree.
    #[serde(default = "default_enabled", rename = "enabledTF")]
    pub enabled_tf: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Page locator resolved from the linked resource.
    #[serde(default, rename = "pageURL", skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_class: Option<String>,
    /// Opaque identifier of the source object. Never used for tree identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl MenuRecord {
    /// Creates an enabled, visible root record with the given identifier and label.
    pub fn new(menu_id: impl Into<String>, menu_name: impl Into<String>) -> Self {
        Self {
            menu_id: menu_id.into(),
            menu_name: menu_name.into(),
            parent_menu_id: None,
            depth: 0,
            sort_no: 0.0,
            display_yn: None,
            enabled_tf: true,
            resource_name: None,
            resource_type: None,
            page_url: None,
            icon_class: None,
            guid: None,
        }
    }

    /// Sets the parent reference and depth.
    pub fn with_parent(mut self, parent_menu_id: impl Into<String>, depth: u32) -> Self {
        self.parent_menu_id = Some(parent_menu_id.into());
        self.depth = depth;
        self
    }

    pub fn with_sort_no(mut self, sort_no: f64) -> Self {
        self.sort_no = sort_no;
        self
    }

    pub fn with_page_url(mut self, page_url: impl Into<String>) -> Self {
        self.page_url = Some(page_url.into());
        self
    }

    /// Returns `true` when the record must be placed at the root regardless of its
    /// parent reference.
    pub fn is_root_eligible(&self) -> bool {
        self.depth == 0 || self.parent_menu_id.as_deref().is_none_or(str::is_empty)
    }

    /// Returns `true` when the record is enabled and flagged visible.
    pub fn is_displayable(&self) -> bool {
        self.enabled_tf && self.display_yn.as_deref().is_none_or(|flag| flag == "Y")
    }

    /// Label to render, falling back to [`MENU_NAME_PLACEHOLDER`].
    pub fn display_name(&self) -> &str {
        if self.menu_name.trim().is_empty() {
            MENU_NAME_PLACEHOLDER
        } else {
            &self.menu_name
        }
    }
}

/// Node of the built menu tree.
///
/// Children are owned exclusively by their parent. UI state (`is_expanded`) lives on
/// the node itself; transforms in the engine produce new trees instead of mutating
/// the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuTreeNode {
    #[serde(flatten)]
    pub record: MenuRecord,
    #[serde(default)]
    pub children: Vec<MenuTreeNode>,
    #[serde(default)]
    pub is_expanded: bool,
    /// Mirrors `record.depth`; informational only.
    #[serde(default)]
    pub level: u32,
    /// Set when at least one child was attached during the build.
    #[serde(default)]
    pub has_children: bool,
    #[serde(default = "default_enabled")]
    pub is_visible: bool,
}

impl MenuTreeNode {
    /// Wraps a record in a fresh collapsed node without children.
    pub fn from_record(record: MenuRecord) -> Self {
        let level = record.depth;
        Self {
            record,
            children: Vec::new(),
            is_expanded: false,
            level,
            has_children: false,
            is_visible: true,
        }
    }

    pub fn menu_id(&self) -> &str {
        &self.record.menu_id
    }

    pub fn sort_no(&self) -> f64 {
        self.record.sort_no
    }
}

/// Payload handed to hosts that forward menu clicks to their own action handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuClickEvent {
    pub menu_id: String,
    pub menu_name: String,
    #[serde(default, rename = "pageURL")]
    pub page_url: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    pub has_children: bool,
}

impl From<&MenuTreeNode> for MenuClickEvent {
    fn from(node: &MenuTreeNode) -> Self {
        Self {
            menu_id: node.record.menu_id.clone(),
            menu_name: node.record.display_name().to_string(),
            page_url: node.record.page_url.clone(),
            resource_type: node.record.resource_type.clone(),
            has_children: !node.children.is_empty(),
        }
    }
}
