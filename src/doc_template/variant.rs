use anyhow::Result;
use async_trait::async_trait;

use super::file::FileDocTemplate;
use super::mock::MockDocTemplate;
use crate::traits::DocTemplate;

/// Enum representing all possible document template implementations.
pub enum DocTemplateVariant {
    File(FileDocTemplate),
    Mock(MockDocTemplate),
}

#[async_trait]
impl DocTemplate for DocTemplateVariant {
    fn name(&self) -> &'static str {
        match self {
            DocTemplateVariant::File(inner) => inner.name(),
            DocTemplateVariant::Mock(inner) => inner.name(),
        }
    }

    async fn duplicate(&self, copy_name: &str) -> Result<String> {
        match self {
            DocTemplateVariant::File(inner) => inner.duplicate(copy_name).await,
            DocTemplateVariant::Mock(inner) => inner.duplicate(copy_name).await,
        }
    }

    async fn replace_all(&self, handle: &str, token: &str, value: &str) -> Result<()> {
        match self {
            DocTemplateVariant::File(inner) => inner.replace_all(handle, token, value).await,
            DocTemplateVariant::Mock(inner) => inner.replace_all(handle, token, value).await,
        }
    }

    async fn save_close(&self, handle: &str) -> Result<()> {
        match self {
            DocTemplateVariant::File(inner) => inner.save_close(handle).await,
            DocTemplateVariant::Mock(inner) => inner.save_close(handle).await,
        }
    }

    async fn export_docx(&self, handle: &str) -> Result<Vec<u8>> {
        match self {
            DocTemplateVariant::File(inner) => inner.export_docx(handle).await,
            DocTemplateVariant::Mock(inner) => inner.export_docx(handle).await,
        }
    }

    async fn trash(&self, handle: &str) -> Result<()> {
        match self {
            DocTemplateVariant::File(inner) => inner.trash(handle).await,
            DocTemplateVariant::Mock(inner) => inner.trash(handle).await,
        }
    }
}
