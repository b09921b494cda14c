use anyhow::Result;
use async_trait::async_trait;

/// Trait for a durable string key/value store.
///
/// Backs the deduplication cache; durability across process restarts is
/// what makes the guard meaningful, since the webhook sender may redeliver
/// after this process has restarted.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Human-readable store name for logging.
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
