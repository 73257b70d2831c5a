use serde::{Deserialize, Serialize};

use crate::menu::MenuTreeNode;

/// Lifecycle phase of the navigation widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "message", rename_all = "lowercase")]
pub enum LoadPhase {
    /// Waiting for the data sources to become available.
    #[default]
    Loading,
    /// Tree built and state replayed.
    Ready,
    /// The upstream data source reported a failure.
    Error(String),
}

/// Snapshot consumed by rendering: the current tree plus the active menu id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub menu_tree: Vec<MenuTreeNode>,
    pub active_menu_id: Option<String>,
    pub phase: LoadPhase,
}

impl NavigationState {
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// Error message when the phase is [`LoadPhase::Error`].
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Orientation of the rendered menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationLayout {
    #[default]
    Vertical,
    Horizontal,
}

/// Docking position of the rendered menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationPosition {
    #[default]
    Left,
    Top,
}
