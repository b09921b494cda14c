use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::traits::BlobStore;

/// File-system blob storage: artifacts land in a fixed output directory.
pub struct FileBlobStore {
    directory: PathBuf,
}

impl FileBlobStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

/// Artifact names carry formatted identifiers (e.g. a CNPJ with a `/`);
/// path separators are not valid in file names.
pub(crate) fn safe_file_name(name: &str) -> String {
    name.replace(['/', '\\'], "-")
}

#[async_trait]
impl BlobStore for FileBlobStore {
    fn name(&self) -> &'static str {
        "file-blobs"
    }

    async fn create_file(&self, name: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.directory)
            .await
            .with_context(|| format!("creating output directory {:?}", self.directory))?;
        let path = self.directory.join(safe_file_name(name));
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("writing blob {:?}", path))?;
        tracing::debug!("FileBlobStore: wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_separators_are_replaced() {
        assert_eq!(
            safe_file_name("Acme - 12.345.678/0001-99.docx"),
            "Acme - 12.345.678-0001-99.docx"
        );
        assert_eq!(safe_file_name("plain.xlsx"), "plain.xlsx");
    }

    #[tokio::test]
    async fn blobs_land_in_the_output_directory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let blobs = FileBlobStore::new(dir.path().join("out"));

        blobs.create_file("Acme - 123.docx", b"conteudo").await?;

        let written = std::fs::read(dir.path().join("out/Acme - 123.docx"))?;
        assert_eq!(written, b"conteudo");
        Ok(())
    }
}
