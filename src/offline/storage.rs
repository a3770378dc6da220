use std::collections::BTreeMap;

use super::Asset;

/// Named caches, each mapping request path to asset.
#[derive(Debug, Clone, Default)]
pub struct CacheStorage {
    caches: BTreeMap<String, BTreeMap<String, Asset>>,
}

impl CacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a named cache, creating it if missing.
    pub fn open(&mut self, name: &str) -> &mut BTreeMap<String, Asset> {
        self.caches.entry(name.to_string()).or_default()
    }

    pub fn names(&self) -> Vec<String> {
        self.caches.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.caches.contains_key(name)
    }

    pub fn delete(&mut self, name: &str) -> bool {
        self.caches.remove(name).is_some()
    }

    /// Look up `path` across every cache, in name order.
    pub fn lookup(&self, path: &str) -> Option<&Asset> {
        self.caches.values().find_map(|cache| cache.get(path))
    }
}

/// Cache names that must go once `current` activates: everything else.
pub fn caches_to_evict(existing: &[String], current: &str) -> Vec<String> {
    existing
        .iter()
        .filter(|name| name.as_str() != current)
        .cloned()
        .collect()
}
