use anyhow::Result;
use async_trait::async_trait;

/// Trait for the append-only tabular record store (one row per accepted
/// submission).
///
/// Rows are immutable once appended; there is no update or delete path.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Human-readable store name for logging.
    fn name(&self) -> &'static str;

    /// Append one row of positional values.
    async fn append_row(&self, values: &[String]) -> Result<()>;

    /// Force buffered writes durable. Called after the row append and
    /// before artifact generation.
    async fn flush(&self) -> Result<()>;
}
