use anyhow::Result;
use async_trait::async_trait;

/// Trait for the output-location blob storage collaborator.
///
/// Receives the exported artifact bytes under their final file name.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Human-readable collaborator name for logging.
    fn name(&self) -> &'static str;

    /// Create a file named `name` with `bytes` in the output location.
    async fn create_file(&self, name: &str, bytes: &[u8]) -> Result<()>;
}
