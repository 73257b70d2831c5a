//! Navigation state controller.
//!
//! The controller owns the [`NavigationState`] consumed by rendering. Data-source
//! transitions rebuild the tree and replay persisted expansion and selection;
//! user events produce new trees through the expansion transforms and persist
//! the result. Persistence is the only side effect: the controller never renders
//! and never navigates.

use std::sync::Arc;

use indexmap::IndexSet;
use navtree_types::{
    AttributeMapping, AttributeSource, LoadPhase, MenuClickEvent, MenuRecord, MenuTreeNode, NavigationState, WidgetConfig,
};
use navtree_util::{MenuCache, MenuStateStore};
use tracing::debug;

use crate::expansion::{
    apply_expanded_set, collect_expanded_ids, expand_path, find_menu_node, find_menu_path, set_all_expanded, toggle_menu_expand,
};
use crate::normalize::normalize_menu_records;
use crate::tree::{TreeBuildOptions, build_menu_tree_with};

/// Status of one host list source.
#[derive(Debug, Clone, PartialEq)]
pub enum ListValue<T> {
    /// Still loading; nothing to read yet.
    Loading,
    /// Items are ready.
    Available(Vec<T>),
    /// The source cannot currently provide items.
    Unavailable,
}

impl<T> ListValue<T> {
    pub fn items(&self) -> Option<&[T]> {
        match self {
            ListValue::Available(items) => Some(items),
            _ => None,
        }
    }
}

/// Behaviour knobs read from the widget configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerOptions {
    pub build: TreeBuildOptions,
    pub attributes: AttributeMapping,
    pub expanded_by_default: bool,
    pub auto_expand_active_path: bool,
}

impl From<&WidgetConfig> for ControllerOptions {
    fn from(config: &WidgetConfig) -> Self {
        Self {
            build: TreeBuildOptions::from(config),
            attributes: config.attributes.clone(),
            expanded_by_default: config.expanded_by_default,
            auto_expand_active_path: config.auto_expand_active_path,
        }
    }
}

#[derive(Debug)]
pub struct NavigationController {
    state: NavigationState,
    store: MenuStateStore,
    options: ControllerOptions,
    cache: Option<(Arc<MenuCache>, String)>,
}

impl NavigationController {
    pub fn new(store: MenuStateStore, options: ControllerOptions) -> Self {
        Self {
            state: NavigationState::default(),
            store,
            options,
            cache: None,
        }
    }

    /// Shares a menu cache; every rebuilt tree is stored under `user_id`.
    pub fn with_cache(mut self, cache: Arc<MenuCache>, user_id: impl Into<String>) -> Self {
        self.cache = Some((cache, user_id.into()));
        self
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn menu_tree(&self) -> &[MenuTreeNode] {
        &self.state.menu_tree
    }

    pub fn active_menu_id(&self) -> Option<&str> {
        self.state.active_menu_id.as_deref()
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.state.phase
    }

    /// Reacts to the current status of the menu and resource sources.
    ///
    /// Only the state where both sources are available does anything: the tree is
    /// rebuilt from scratch and persisted state is replayed. Any other
    /// combination leaves the controller as it is.
    pub fn on_data_source<M, R>(&mut self, menus: &ListValue<M>, resources: &ListValue<R>)
    where
        M: AttributeSource,
        R: AttributeSource,
    {
        let (Some(menus), Some(resources)) = (menus.items(), resources.items()) else {
            debug!(phase = ?self.state.phase, "Menu data not available yet");
            return;
        };
        let records = normalize_menu_records(menus, resources, &self.options.attributes);
        self.load_records(&records);
    }

    /// Builds the tree from already normalized records and enters `Ready`.
    pub fn load_records(&mut self, records: &[MenuRecord]) {
        let tree = build_menu_tree_with(records, &self.options.build);
        debug!(records = records.len(), roots = tree.len(), "Menu tree rebuilt");
        if let Some((cache, user_id)) = &self.cache {
            cache.set(user_id, tree.clone());
        }
        self.enter_ready(tree);
    }

    /// Serves a fresh cached tree while the sources are still loading. Returns
    /// `true` when the controller became ready from the cache.
    pub fn restore_from_cache(&mut self) -> bool {
        if self.state.phase != LoadPhase::Loading {
            return false;
        }
        let Some(tree) = self.cache.as_ref().and_then(|(cache, user_id)| cache.get(user_id, None)) else {
            return false;
        };
        debug!(roots = tree.len(), "Menu tree restored from cache");
        self.enter_ready(tree);
        true
    }

    /// Records an upstream data failure. A later data transition recovers.
    pub fn on_data_error(&mut self, message: impl Into<String>) {
        self.state = NavigationState {
            phase: LoadPhase::Error(message.into()),
            ..NavigationState::default()
        };
    }

    /// Marks `menu_id` active and persists it along with the current expansion.
    pub fn on_menu_click(&mut self, menu_id: &str) {
        if !self.is_ready("menu click") {
            return;
        }
        self.store.save_active_menu_id(Some(menu_id));
        self.persist_expanded(&self.state.menu_tree);
        self.state.active_menu_id = Some(menu_id.to_string());
    }

    pub fn on_toggle_expand(&mut self, menu_id: &str) {
        if !self.is_ready("toggle") {
            return;
        }
        let tree = toggle_menu_expand(&self.state.menu_tree, menu_id);
        self.replace_tree(tree);
    }

    pub fn on_expand_all(&mut self) {
        if !self.is_ready("expand all") {
            return;
        }
        let tree = set_all_expanded(&self.state.menu_tree, true);
        self.replace_tree(tree);
    }

    pub fn on_collapse_all(&mut self) {
        if !self.is_ready("collapse all") {
            return;
        }
        let tree = set_all_expanded(&self.state.menu_tree, false);
        self.replace_tree(tree);
    }

    /// Click payload for hosts that forward clicks to their own action.
    pub fn click_event(&self, menu_id: &str) -> Option<MenuClickEvent> {
        find_menu_node(&self.state.menu_tree, menu_id).map(MenuClickEvent::from)
    }

    fn enter_ready(&mut self, base_tree: Vec<MenuTreeNode>) {
        let persisted = self.store.load_expanded_menu_ids();
        let mut tree = if persisted.is_empty() && self.options.expanded_by_default {
            set_all_expanded(&base_tree, true)
        } else {
            let expanded: IndexSet<String> = persisted.into_iter().collect();
            apply_expanded_set(&base_tree, &expanded)
        };

        let active_menu_id = self.store.load_active_menu_id();
        if self.options.auto_expand_active_path
            && let Some(active) = active_menu_id.as_deref()
            && let Some(path) = find_menu_path(&tree, active)
        {
            tree = expand_path(&tree, &path);
        }

        self.state = NavigationState {
            menu_tree: tree,
            active_menu_id,
            phase: LoadPhase::Ready,
        };
    }

    fn replace_tree(&mut self, tree: Vec<MenuTreeNode>) {
        self.persist_expanded(&tree);
        self.state.menu_tree = tree;
    }

    fn persist_expanded(&self, tree: &[MenuTreeNode]) {
        let expanded: Vec<String> = collect_expanded_ids(tree).into_iter().collect();
        self.store.save_expanded_menu_ids(&expanded);
    }

    fn is_ready(&self, event: &str) -> bool {
        let ready = self.state.phase == LoadPhase::Ready;
        if !ready {
            debug!(event, phase = ?self.state.phase, "Ignoring menu event before the tree is ready");
        }
        ready
    }
}
