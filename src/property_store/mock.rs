use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::traits::PropertyStore;

/// Mock in-memory property store for testing.
#[derive(Clone)]
pub struct MockPropertyStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MockPropertyStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of stored entries (for verification).
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MockPropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyStore for MockPropertyStore {
    fn name(&self) -> &'static str {
        "mock-properties"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
