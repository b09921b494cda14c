use anyhow::Result;
use async_trait::async_trait;

/// Trait for the document template collaborator.
///
/// The generator duplicates a fixed template into a working copy, rewrites
/// placeholder tokens, exports the finalized copy to the binary document
/// format, and trashes the working copy. Working copies are addressed by an
/// opaque string handle returned from [`DocTemplate::duplicate`].
#[async_trait]
pub trait DocTemplate: Send + Sync {
    /// Human-readable collaborator name for logging.
    fn name(&self) -> &'static str;

    /// Duplicate the template into the work area under `copy_name` and
    /// return a handle to the working copy.
    async fn duplicate(&self, copy_name: &str) -> Result<String>;

    /// Replace every occurrence of `token` with `value` in the working
    /// copy's body.
    async fn replace_all(&self, handle: &str, token: &str, value: &str) -> Result<()>;

    /// Commit pending edits; the working copy accepts no further edits.
    async fn save_close(&self, handle: &str) -> Result<()>;

    /// Export the finalized working copy as document-format bytes.
    async fn export_docx(&self, handle: &str) -> Result<Vec<u8>>;

    /// Discard the working copy. It is not a deliverable.
    async fn trash(&self, handle: &str) -> Result<()>;
}
