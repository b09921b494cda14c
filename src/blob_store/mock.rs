use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::traits::BlobStore;

/// Mock blob storage for testing.
/// Stores created files in memory for verification.
#[derive(Clone)]
pub struct MockBlobStore {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    order: Arc<Mutex<Vec<String>>>,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            order: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// File names in creation order.
    pub fn file_names(&self) -> Vec<String> {
        self.order.lock().unwrap().clone()
    }

    /// Bytes of a created file, if any.
    pub fn file_bytes(&self, name: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(name).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }
}

impl Default for MockBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    fn name(&self) -> &'static str {
        "mock-blobs"
    }

    async fn create_file(&self, name: &str, bytes: &[u8]) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(name.to_string(), bytes.to_vec());
        self.order.lock().unwrap().push(name.to_string());
        tracing::debug!("MockBlobStore: created {} ({} bytes)", name, bytes.len());
        Ok(())
    }
}
