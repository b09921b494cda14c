use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use crate::blob_store::file::safe_file_name;
use crate::traits::{DocTemplate, HandleError};

/// File-based document template.
///
/// The template is a text document on disk; working copies live in a work
/// directory and are addressed by their path. Export returns the finalized
/// copy's bytes.
pub struct FileDocTemplate {
    template_path: PathBuf,
    work_dir: PathBuf,
    closed: Mutex<HashSet<String>>,
}

impl FileDocTemplate {
    pub fn new(template_path: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            work_dir: work_dir.into(),
            closed: Mutex::new(HashSet::new()),
        }
    }

    fn check_handle(&self, handle: &str) -> Result<PathBuf> {
        let path = PathBuf::from(handle);
        if !path.exists() {
            return Err(HandleError::UnknownDoc(handle.to_string()).into());
        }
        Ok(path)
    }
}

#[async_trait]
impl DocTemplate for FileDocTemplate {
    fn name(&self) -> &'static str {
        "file-template"
    }

    async fn duplicate(&self, copy_name: &str) -> Result<String> {
        tokio::fs::create_dir_all(&self.work_dir)
            .await
            .with_context(|| format!("creating work directory {:?}", self.work_dir))?;
        let body = tokio::fs::read(&self.template_path)
            .await
            .with_context(|| format!("reading template {:?}", self.template_path))?;
        let copy_path = self.work_dir.join(safe_file_name(copy_name));
        tokio::fs::write(&copy_path, body)
            .await
            .with_context(|| format!("writing working copy {:?}", copy_path))?;
        let handle = copy_path.to_string_lossy().into_owned();
        // A fresh copy is open even if a previous one at this path was closed.
        self.closed.lock().unwrap().remove(&handle);
        Ok(handle)
    }

    async fn replace_all(&self, handle: &str, token: &str, value: &str) -> Result<()> {
        let path = self.check_handle(handle)?;
        if self.closed.lock().unwrap().contains(handle) {
            bail!("working copy {} is closed for edits", handle);
        }
        let body = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading working copy {:?}", path))?;
        tokio::fs::write(&path, body.replace(token, value))
            .await
            .with_context(|| format!("rewriting working copy {:?}", path))?;
        Ok(())
    }

    async fn save_close(&self, handle: &str) -> Result<()> {
        let path = self.check_handle(handle)?;
        let file = tokio::fs::File::open(&path).await?;
        file.sync_all()
            .await
            .with_context(|| format!("syncing working copy {:?}", path))?;
        self.closed.lock().unwrap().insert(handle.to_string());
        Ok(())
    }

    async fn export_docx(&self, handle: &str) -> Result<Vec<u8>> {
        let path = self.check_handle(handle)?;
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("exporting working copy {:?}", path))?;
        Ok(bytes)
    }

    async fn trash(&self, handle: &str) -> Result<()> {
        let path = Path::new(handle);
        self.closed.lock().unwrap().remove(handle);
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(HandleError::UnknownDoc(handle.to_string()).into())
            }
            Err(e) => Err(e).with_context(|| format!("trashing working copy {:?}", path)),
        }
    }
}
