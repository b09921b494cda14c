use anyhow::Result;
use async_trait::async_trait;

/// Trait for the spreadsheet collaborator.
///
/// The exporter creates a working workbook per submission, fills it with
/// key/value rows, exports it to the binary spreadsheet format, and trashes
/// the working object. Workbooks are addressed by an opaque string handle.
#[async_trait]
pub trait Workbook: Send + Sync {
    /// Human-readable collaborator name for logging.
    fn name(&self) -> &'static str;

    /// Create a named working workbook and return its handle.
    async fn create(&self, name: &str) -> Result<String>;

    /// Append one row to the working workbook.
    async fn append_row(&self, handle: &str, row: &[String]) -> Result<()>;

    /// Force buffered rows durable.
    async fn flush(&self, handle: &str) -> Result<()>;

    /// Export the working workbook as spreadsheet-format bytes.
    async fn export_xlsx(&self, handle: &str) -> Result<Vec<u8>>;

    /// Discard the working workbook.
    async fn trash(&self, handle: &str) -> Result<()>;
}
