//! Versioned read-through cache for the calculator's static assets.
//!
//! Kept apart from the calculator: nothing here touches the results record
//! or the expense ledger.

mod storage;
mod worker;

pub use storage::*;
pub use worker::*;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

/// Version tag of the current asset cache.
pub const CACHE_VERSION: &str = "butane-pwa-v1";

/// Assets fetched on install.
pub const ASSET_MANIFEST: [&str; 6] = [
    "/",
    "/index.html",
    "/style.css",
    "/app.js",
    "/manifest.json",
    "/service-worker.js",
];

/// Document served to navigations when both cache and network fail.
pub const ROOT_DOCUMENT: &str = "/";

/// A cached or fetched static asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub path: String,
    pub body: Vec<u8>,
}

impl Asset {
    pub fn new(path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            body: body.into(),
        }
    }
}

/// An incoming request for an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub method: String,
    pub path: String,
    /// True for top-level page loads.
    pub navigation: bool,
}

impl AssetRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            path: path.into(),
            navigation: false,
        }
    }

    pub fn navigate(path: impl Into<String>) -> Self {
        Self {
            navigation: true,
            ..Self::get(path)
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }
}

/// Network side of the cache.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Asset>;
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cannot {action} a cache in state {state}")]
    InvalidTransition {
        action: &'static str,
        state: CacheState,
    },

    #[error("Install of {version} failed while fetching {path}: {reason}")]
    InstallFailed {
        version: String,
        path: String,
        reason: String,
    },

    #[error("Failed to fetch {path}: {reason}")]
    FetchFailed { path: String, reason: String },
}
