use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::blob_store::file::safe_file_name;
use crate::record_store::csv::encode_row;
use crate::traits::{HandleError, Workbook};

/// File-based working workbook.
///
/// Rows are buffered in memory per handle; `flush` persists them to a file
/// in the work directory, `export_xlsx` serializes the buffered rows.
pub struct FileWorkbook {
    work_dir: PathBuf,
    books: Mutex<HashMap<String, Vec<Vec<String>>>>,
}

impl FileWorkbook {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            books: Mutex::new(HashMap::new()),
        }
    }

    fn serialize(rows: &[Vec<String>]) -> Vec<u8> {
        let mut out = String::new();
        for row in rows {
            out.push_str(&encode_row(row));
            out.push('\n');
        }
        out.into_bytes()
    }
}

#[async_trait]
impl Workbook for FileWorkbook {
    fn name(&self) -> &'static str {
        "file-workbook"
    }

    async fn create(&self, name: &str) -> Result<String> {
        tokio::fs::create_dir_all(&self.work_dir)
            .await
            .with_context(|| format!("creating work directory {:?}", self.work_dir))?;
        let path = self.work_dir.join(safe_file_name(name));
        let handle = path.to_string_lossy().into_owned();
        self.books.lock().await.insert(handle.clone(), Vec::new());
        Ok(handle)
    }

    async fn append_row(&self, handle: &str, row: &[String]) -> Result<()> {
        let mut books = self.books.lock().await;
        let rows = books
            .get_mut(handle)
            .ok_or_else(|| HandleError::UnknownWorkbook(handle.to_string()))?;
        rows.push(row.to_vec());
        Ok(())
    }

    async fn flush(&self, handle: &str) -> Result<()> {
        let books = self.books.lock().await;
        let rows = books
            .get(handle)
            .ok_or_else(|| HandleError::UnknownWorkbook(handle.to_string()))?;
        tokio::fs::write(handle, Self::serialize(rows))
            .await
            .with_context(|| format!("flushing workbook {handle}"))?;
        let file = tokio::fs::File::open(handle).await?;
        file.sync_all().await?;
        Ok(())
    }

    async fn export_xlsx(&self, handle: &str) -> Result<Vec<u8>> {
        let books = self.books.lock().await;
        let rows = books
            .get(handle)
            .ok_or_else(|| HandleError::UnknownWorkbook(handle.to_string()))?;
        Ok(Self::serialize(rows))
    }

    async fn trash(&self, handle: &str) -> Result<()> {
        let removed = self.books.lock().await.remove(handle);
        if removed.is_none() {
            return Err(HandleError::UnknownWorkbook(handle.to_string()).into());
        }
        // The flushed working file may or may not exist.
        match tokio::fs::remove_file(Path::new(handle)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("trashing workbook {handle}")),
        }
    }
}
