//! Persistence of navigation UI state.
//!
//! Two independent values are kept: the ordered list of expanded menu ids and the
//! active menu id. Storage problems never reach the caller: every failure is
//! logged as a warning and reads fall back to "nothing persisted".

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::key_value_store::KeyValueStore;

/// Storage key of the expanded menu id list (JSON array of strings).
pub const EXPANDED_MENU_IDS_KEY: &str = "navtree-nav-expanded-menu-ids";

/// Storage key of the active menu id (plain string).
pub const ACTIVE_MENU_ID_KEY: &str = "navtree-nav-active-menu-id";

/// Load/save/clear adapter over an optional storage backend.
///
/// A store without a backend behaves like an empty store that drops writes.
#[derive(Clone, Default)]
pub struct MenuStateStore {
    backend: Option<Arc<dyn KeyValueStore>>,
}

impl fmt::Debug for MenuStateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuStateStore").field("attached", &self.backend.is_some()).finish()
    }
}

impl MenuStateStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend: Some(backend) }
    }

    /// Store used when no storage capability exists.
    pub fn detached() -> Self {
        Self { backend: None }
    }

    pub fn save_expanded_menu_ids(&self, expanded_ids: &[String]) {
        let Some(backend) = &self.backend else {
            return;
        };
        let result = serde_json::to_string(expanded_ids)
            .map_err(Into::into)
            .and_then(|payload| backend.set_item(EXPANDED_MENU_IDS_KEY, &payload));
        if let Err(error) = result {
            warn!(key = EXPANDED_MENU_IDS_KEY, error = %error, "Failed to save expanded menu ids");
        }
    }

    /// Returns the persisted expanded ids in the order they were saved, or an empty
    /// list when nothing usable is stored.
    pub fn load_expanded_menu_ids(&self) -> Vec<String> {
        let Some(backend) = &self.backend else {
            return Vec::new();
        };
        match backend.get_item(EXPANDED_MENU_IDS_KEY) {
            Ok(Some(payload)) if !payload.is_empty() => match serde_json::from_str::<Vec<String>>(&payload) {
                Ok(ids) => ids,
                Err(error) => {
                    warn!(key = EXPANDED_MENU_IDS_KEY, error = %error, "Failed to parse expanded menu ids");
                    Vec::new()
                }
            },
            Ok(_) => Vec::new(),
            Err(error) => {
                warn!(key = EXPANDED_MENU_IDS_KEY, error = %error, "Failed to load expanded menu ids");
                Vec::new()
            }
        }
    }

    pub fn clear_expanded_menu_ids(&self) {
        self.remove(EXPANDED_MENU_IDS_KEY);
    }

    /// Persists the active menu id. `None` (or an empty id) clears it.
    pub fn save_active_menu_id(&self, menu_id: Option<&str>) {
        let Some(backend) = &self.backend else {
            return;
        };
        match menu_id.filter(|id| !id.is_empty()) {
            Some(id) => {
                if let Err(error) = backend.set_item(ACTIVE_MENU_ID_KEY, id) {
                    warn!(key = ACTIVE_MENU_ID_KEY, error = %error, "Failed to save active menu id");
                }
            }
            None => self.remove(ACTIVE_MENU_ID_KEY),
        }
    }

    pub fn load_active_menu_id(&self) -> Option<String> {
        let backend = self.backend.as_ref()?;
        match backend.get_item(ACTIVE_MENU_ID_KEY) {
            Ok(value) => value.filter(|id| !id.is_empty()),
            Err(error) => {
                warn!(key = ACTIVE_MENU_ID_KEY, error = %error, "Failed to load active menu id");
                None
            }
        }
    }

    pub fn clear_active_menu_id(&self) {
        self.remove(ACTIVE_MENU_ID_KEY);
    }

    fn remove(&self, key: &str) {
        let Some(backend) = &self.backend else {
            return;
        };
        if let Err(error) = backend.remove_item(key) {
            warn!(key = key, error = %error, "Failed to clear persisted value");
        }
    }
}
