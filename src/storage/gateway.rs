use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::KeyValueStore;

/// JSON view over a [`KeyValueStore`].
///
/// Reads never fail: a missing, unreadable or corrupt blob yields the caller's
/// default. Writes are fire-and-forget; failures are logged and dropped.
pub struct Gateway<S> {
    store: S,
}

impl<S: KeyValueStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "no stored value, using default");
                return default;
            }
            Err(e) => {
                warn!(key, error = %e, "failed to read stored value, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored value is not valid, using default");
                default
            }
        }
    }

    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                error!(key, error = %e, "failed to encode value");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &json).await {
            error!(key, error = %e, "failed to persist value");
        }
    }
}
