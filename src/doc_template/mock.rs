use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::traits::{DocTemplate, HandleError};

#[derive(Debug, Clone)]
struct DocState {
    name: String,
    body: String,
    closed: bool,
}

/// Mock document template for testing.
/// Working copies live in memory; exports and trashing are observable.
#[derive(Clone)]
pub struct MockDocTemplate {
    template_body: String,
    next_id: Arc<Mutex<u64>>,
    docs: Arc<Mutex<HashMap<String, DocState>>>,
    trashed: Arc<Mutex<Vec<String>>>,
}

impl MockDocTemplate {
    pub fn new(template_body: &str) -> Self {
        Self {
            template_body: template_body.to_string(),
            next_id: Arc::new(Mutex::new(0)),
            docs: Arc::new(Mutex::new(HashMap::new())),
            trashed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Body of a live working copy, if any (for verification).
    pub fn body_of(&self, handle: &str) -> Option<String> {
        self.docs
            .lock()
            .unwrap()
            .get(handle)
            .map(|d| d.body.clone())
    }

    /// Names of working copies that were trashed, in order.
    pub fn trashed_names(&self) -> Vec<String> {
        self.trashed.lock().unwrap().clone()
    }

    /// Number of still-live working copies.
    pub fn live_copies(&self) -> usize {
        self.docs.lock().unwrap().len()
    }
}

#[async_trait]
impl DocTemplate for MockDocTemplate {
    fn name(&self) -> &'static str {
        "mock-template"
    }

    async fn duplicate(&self, copy_name: &str) -> Result<String> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let handle = format!("doc-{}", *next_id);
        self.docs.lock().unwrap().insert(
            handle.clone(),
            DocState {
                name: copy_name.to_string(),
                body: self.template_body.clone(),
                closed: false,
            },
        );
        Ok(handle)
    }

    async fn replace_all(&self, handle: &str, token: &str, value: &str) -> Result<()> {
        let mut docs = self.docs.lock().unwrap();
        let doc = docs
            .get_mut(handle)
            .ok_or_else(|| HandleError::UnknownDoc(handle.to_string()))?;
        if doc.closed {
            bail!("working copy {} is closed for edits", handle);
        }
        doc.body = doc.body.replace(token, value);
        Ok(())
    }

    async fn save_close(&self, handle: &str) -> Result<()> {
        let mut docs = self.docs.lock().unwrap();
        let doc = docs
            .get_mut(handle)
            .ok_or_else(|| HandleError::UnknownDoc(handle.to_string()))?;
        doc.closed = true;
        Ok(())
    }

    async fn export_docx(&self, handle: &str) -> Result<Vec<u8>> {
        let docs = self.docs.lock().unwrap();
        let doc = docs
            .get(handle)
            .ok_or_else(|| HandleError::UnknownDoc(handle.to_string()))?;
        Ok(doc.body.clone().into_bytes())
    }

    async fn trash(&self, handle: &str) -> Result<()> {
        let removed = self.docs.lock().unwrap().remove(handle);
        match removed {
            Some(doc) => {
                self.trashed.lock().unwrap().push(doc.name);
                Ok(())
            }
            None => Err(HandleError::UnknownDoc(handle.to_string()).into()),
        }
    }
}
