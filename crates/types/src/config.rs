//! Widget configuration surface.
//!
//! Every field is defaulted so a partial JSON document (or none at all) yields a
//! usable configuration. Presentation settings (widths, colors) are carried through
//! untouched for the renderer; behaviour settings are read by the engine.

use serde::{Deserialize, Serialize};

use crate::navigation::{NavigationLayout, NavigationPosition};

/// Default lifetime of cached menu trees, in milliseconds.
pub const DEFAULT_CACHE_DURATION_MS: u64 = 300_000;

/// Default label of the menu entry handled by the dedicated home button.
pub const DEFAULT_HOME_LABEL: &str = "홈";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    pub layout: NavigationLayout,
    pub position: NavigationPosition,
    pub sidebar_width: String,
    pub topbar_height: String,
    pub collapsible: bool,
    pub theme_color: String,
    /// Deepest level at which a node may still show an expand arrow.
    pub max_depth: u32,
    pub show_depth_indicator: bool,
    pub animation_duration: u32,
    pub enable_keyboard_nav: bool,
    /// Lifetime of cached menu trees, in milliseconds.
    pub cache_duration: u64,
    pub debug_mode: bool,
    /// Start fully expanded when no expansion state has been persisted.
    pub expanded_by_default: bool,
    /// Expand the ancestors of the active menu after state is replayed.
    pub auto_expand_active_path: bool,
    /// Menu label excluded from the tree because the home button covers it.
    pub home_label: String,
    pub attributes: AttributeMapping,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            layout: NavigationLayout::default(),
            position: NavigationPosition::default(),
            sidebar_width: "260px".into(),
            topbar_height: "60px".into(),
            collapsible: true,
            theme_color: "#1e3a5f".into(),
            max_depth: 3,
            show_depth_indicator: false,
            animation_duration: 300,
            enable_keyboard_nav: true,
            cache_duration: DEFAULT_CACHE_DURATION_MS,
            debug_mode: false,
            expanded_by_default: false,
            auto_expand_active_path: false,
            home_label: DEFAULT_HOME_LABEL.into(),
            attributes: AttributeMapping::default(),
        }
    }
}

/// Names of the attributes read from raw menu and resource objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeMapping {
    pub menu_id: String,
    pub menu_name: String,
    pub parent_menu_id: String,
    pub depth: String,
    pub sort_no: String,
    pub display_yn: String,
    pub enabled: String,
    /// Association attribute on the menu object holding the linked resource id.
    pub resource_association: String,
    pub resource_name: String,
    pub resource_type: String,
    pub page_url: String,
    pub icon_class: String,
}

impl Default for AttributeMapping {
    fn default() -> Self {
        Self {
            menu_id: "MenuId".into(),
            menu_name: "MenuName".into(),
            parent_menu_id: "ParentId".into(),
            depth: "Depth".into(),
            sort_no: "SortNo".into(),
            display_yn: "DisplayYn".into(),
            enabled: "EnableTF".into(),
            resource_association: "PortalModule.SyMenu_SyResource".into(),
            resource_name: "ResourceName".into(),
            resource_type: "ResourceType".into(),
            page_url: "PageUrl".into(),
            icon_class: "IconClass".into(),
        }
    }
}
