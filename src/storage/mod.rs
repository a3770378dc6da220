mod gateway;
mod memory;
mod repository;

pub use gateway::*;
pub use memory::*;
pub use repository::*;

use anyhow::Result;
use async_trait::async_trait;

/// SQL migration for the key-value table
pub const MIGRATION_001_KV_STORE: &str = include_str!("migrations/001_kv_store.sql");

/// Key holding the last submitted calculator inputs.
pub const INPUTS_KEY: &str = "butane_inputs";

/// Key holding the expense list.
pub const EXPENSES_KEY: &str = "butane_expenses";

/// Durable string blobs addressed by key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
