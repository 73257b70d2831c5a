//! Per-user cache of built menu trees.
//!
//! The cache is a shared service: construct it once with a default lifetime and
//! hand clones of an `Arc<MenuCache>` to whoever needs it. Every operation takes
//! the internal lock for the duration of a single map operation, so callers never
//! need their own locking.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, Utc};
use navtree_types::MenuTreeNode;
use tracing::debug;

/// One cached tree together with the moment it was stored.
#[derive(Debug, Clone)]
pub struct CachedMenu {
    pub user_id: String,
    pub data: Vec<MenuTreeNode>,
    pub timestamp: DateTime<Utc>,
}

impl CachedMenu {
    fn is_expired(&self, now: DateTime<Utc>, max_age: TimeDelta) -> bool {
        now - self.timestamp > max_age
    }
}

#[derive(Debug)]
pub struct MenuCache {
    entries: Mutex<HashMap<String, CachedMenu>>,
    default_max_age: TimeDelta,
}

impl MenuCache {
    pub fn new(default_max_age: TimeDelta) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_max_age,
        }
    }

    /// Builds a cache whose default lifetime is given in milliseconds, the unit
    /// used by the widget configuration.
    pub fn from_millis(max_age_ms: u64) -> Self {
        let max_age = i64::try_from(max_age_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .unwrap_or(TimeDelta::MAX);
        Self::new(max_age)
    }

    pub fn default_max_age(&self) -> TimeDelta {
        self.default_max_age
    }

    /// Returns the cached tree for `user_id` unless it is older than `max_age`
    /// (or the default lifetime). Expired entries are evicted on the way out.
    pub fn get(&self, user_id: &str, max_age: Option<TimeDelta>) -> Option<Vec<MenuTreeNode>> {
        self.get_at(user_id, max_age, Utc::now())
    }

    pub fn set(&self, user_id: &str, data: Vec<MenuTreeNode>) {
        self.insert_at(user_id, data, Utc::now());
    }

    pub fn clear(&self, user_id: &str) {
        self.entries.lock().expect("menu cache lock poisoned").remove(user_id);
    }

    pub fn clear_all(&self) {
        self.entries.lock().expect("menu cache lock poisoned").clear();
    }

    /// Drops every entry older than `max_age` (or the default lifetime).
    pub fn cleanup(&self, max_age: Option<TimeDelta>) {
        self.cleanup_at(max_age, Utc::now());
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("menu cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, user_id: &str, max_age: Option<TimeDelta>, now: DateTime<Utc>) -> Option<Vec<MenuTreeNode>> {
        let max_age = max_age.unwrap_or(self.default_max_age);
        let mut entries = self.entries.lock().expect("menu cache lock poisoned");
        let cached = entries.get(user_id)?;
        if cached.is_expired(now, max_age) {
            debug!(user_id, "Menu cache entry expired");
            entries.remove(user_id);
            return None;
        }
        Some(cached.data.clone())
    }

    fn insert_at(&self, user_id: &str, data: Vec<MenuTreeNode>, timestamp: DateTime<Utc>) {
        let cached = CachedMenu {
            user_id: user_id.to_string(),
            data,
            timestamp,
        };
        self.entries
            .lock()
            .expect("menu cache lock poisoned")
            .insert(user_id.to_string(), cached);
    }

    fn cleanup_at(&self, max_age: Option<TimeDelta>, now: DateTime<Utc>) {
        let max_age = max_age.unwrap_or(self.default_max_age);
        self.entries
            .lock()
            .expect("menu cache lock poisoned")
            .retain(|_, cached| !cached.is_expired(now, max_age));
    }
}

impl Default for MenuCache {
    fn default() -> Self {
        Self::from_millis(navtree_types::config::DEFAULT_CACHE_DURATION_MS)
    }
}
