use anyhow::Result;
use async_trait::async_trait;

use super::file::FileBlobStore;
use super::http::HttpBlobStore;
use super::mock::MockBlobStore;
use crate::traits::BlobStore;

/// Enum representing all possible blob storage implementations.
pub enum BlobStoreVariant {
    File(FileBlobStore),
    Http(HttpBlobStore),
    Mock(MockBlobStore),
}

#[async_trait]
impl BlobStore for BlobStoreVariant {
    fn name(&self) -> &'static str {
        match self {
            BlobStoreVariant::File(inner) => inner.name(),
            BlobStoreVariant::Http(inner) => inner.name(),
            BlobStoreVariant::Mock(inner) => inner.name(),
        }
    }

    async fn create_file(&self, name: &str, bytes: &[u8]) -> Result<()> {
        match self {
            BlobStoreVariant::File(inner) => inner.create_file(name, bytes).await,
            BlobStoreVariant::Http(inner) => inner.create_file(name, bytes).await,
            BlobStoreVariant::Mock(inner) => inner.create_file(name, bytes).await,
        }
    }
}
