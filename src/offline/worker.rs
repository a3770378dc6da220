use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info, warn};

use super::{
    ASSET_MANIFEST, Asset, AssetFetcher, AssetRequest, CACHE_VERSION, CacheError, CacheStorage,
    ROOT_DOCUMENT, caches_to_evict,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Installing,
    Active,
    Superseded,
}

impl CacheState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheState::Installing => "installing",
            CacheState::Active => "active",
            CacheState::Superseded => "superseded",
        }
    }
}

impl fmt::Display for CacheState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One version of the asset cache and its lifecycle.
#[derive(Debug, Clone)]
pub struct AssetCache {
    version: String,
    manifest: Vec<String>,
    state: CacheState,
    installed: bool,
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new(CACHE_VERSION, ASSET_MANIFEST.iter().map(|p| p.to_string()).collect())
    }
}

impl AssetCache {
    pub fn new(version: impl Into<String>, manifest: Vec<String>) -> Self {
        Self {
            version: version.into(),
            manifest,
            state: CacheState::Installing,
            installed: false,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn state(&self) -> CacheState {
        self.state
    }

    pub fn manifest(&self) -> &[String] {
        &self.manifest
    }

    /// Fetch the whole manifest into this version's cache.
    ///
    /// All-or-nothing: nothing is written unless every asset was fetched.
    pub async fn install<F: AssetFetcher>(
        &mut self,
        storage: &mut CacheStorage,
        fetcher: &F,
    ) -> Result<usize, CacheError> {
        if self.state != CacheState::Installing {
            return Err(CacheError::InvalidTransition {
                action: "install",
                state: self.state,
            });
        }

        let mut fetched = BTreeMap::new();
        for path in &self.manifest {
            let asset = fetcher
                .fetch(path)
                .await
                .map_err(|e| CacheError::InstallFailed {
                    version: self.version.clone(),
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            fetched.insert(path.clone(), asset);
        }

        let count = fetched.len();
        storage.open(&self.version).extend(fetched);
        self.installed = true;
        info!(version = %self.version, assets = count, "asset cache installed");
        Ok(count)
    }

    /// Take over from older versions, deleting their caches.
    /// Returns the names of the caches that were evicted.
    pub fn activate(&mut self, storage: &mut CacheStorage) -> Result<Vec<String>, CacheError> {
        if self.state != CacheState::Installing || !self.installed {
            return Err(CacheError::InvalidTransition {
                action: "activate",
                state: self.state,
            });
        }

        let evicted = caches_to_evict(&storage.names(), &self.version);
        for name in &evicted {
            storage.delete(name);
        }
        self.state = CacheState::Active;
        info!(version = %self.version, evicted = evicted.len(), "asset cache active");
        Ok(evicted)
    }

    /// Step aside for a newer version.
    pub fn supersede(&mut self) -> Result<(), CacheError> {
        if self.state != CacheState::Active {
            return Err(CacheError::InvalidTransition {
                action: "supersede",
                state: self.state,
            });
        }
        self.state = CacheState::Superseded;
        Ok(())
    }

    /// Answer a request from cache, falling back to the network.
    ///
    /// Returns `None` when the request is not intercepted: non-GET requests,
    /// or a cache that is not the active one.
    pub async fn handle<F: AssetFetcher>(
        &self,
        storage: &mut CacheStorage,
        request: &AssetRequest,
        fetcher: &F,
    ) -> Option<Result<Asset, CacheError>> {
        if self.state != CacheState::Active || !request.is_get() {
            return None;
        }

        if let Some(hit) = storage.lookup(&request.path) {
            debug!(path = %request.path, "cache hit");
            return Some(Ok(hit.clone()));
        }

        match fetcher.fetch(&request.path).await {
            Ok(asset) => {
                storage
                    .open(&self.version)
                    .insert(request.path.clone(), asset.clone());
                Some(Ok(asset))
            }
            Err(e) => {
                warn!(path = %request.path, error = %e, "fetch failed");
                if request.navigation {
                    if let Some(root) = storage.lookup(ROOT_DOCUMENT) {
                        return Some(Ok(root.clone()));
                    }
                }
                Some(Err(CacheError::FetchFailed {
                    path: request.path.clone(),
                    reason: e.to_string(),
                }))
            }
        }
    }
}
