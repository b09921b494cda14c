use anyhow::Result;
use async_trait::async_trait;

use super::file::FileWorkbook;
use super::mock::MockWorkbook;
use crate::traits::Workbook;

/// Enum representing all possible workbook implementations.
pub enum WorkbookVariant {
    File(FileWorkbook),
    Mock(MockWorkbook),
}

#[async_trait]
impl Workbook for WorkbookVariant {
    fn name(&self) -> &'static str {
        match self {
            WorkbookVariant::File(inner) => inner.name(),
            WorkbookVariant::Mock(inner) => inner.name(),
        }
    }

    async fn create(&self, name: &str) -> Result<String> {
        match self {
            WorkbookVariant::File(inner) => inner.create(name).await,
            WorkbookVariant::Mock(inner) => inner.create(name).await,
        }
    }

    async fn append_row(&self, handle: &str, row: &[String]) -> Result<()> {
        match self {
            WorkbookVariant::File(inner) => inner.append_row(handle, row).await,
            WorkbookVariant::Mock(inner) => inner.append_row(handle, row).await,
        }
    }

    async fn flush(&self, handle: &str) -> Result<()> {
        match self {
            WorkbookVariant::File(inner) => inner.flush(handle).await,
            WorkbookVariant::Mock(inner) => inner.flush(handle).await,
        }
    }

    async fn export_xlsx(&self, handle: &str) -> Result<Vec<u8>> {
        match self {
            WorkbookVariant::File(inner) => inner.export_xlsx(handle).await,
            WorkbookVariant::Mock(inner) => inner.export_xlsx(handle).await,
        }
    }

    async fn trash(&self, handle: &str) -> Result<()> {
        match self {
            WorkbookVariant::File(inner) => inner.trash(handle).await,
            WorkbookVariant::Mock(inner) => inner.trash(handle).await,
        }
    }
}
