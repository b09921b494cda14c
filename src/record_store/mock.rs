use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::traits::RecordStore;

/// Mock record store for testing.
/// Keeps appended rows in memory and can be told to fail appends.
#[derive(Clone)]
pub struct MockRecordStore {
    rows: Arc<Mutex<Vec<Vec<String>>>>,
    flushes: Arc<Mutex<usize>>,
    fail_appends: Arc<Mutex<bool>>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            flushes: Arc::new(Mutex::new(0)),
            fail_appends: Arc::new(Mutex::new(false)),
        }
    }

    /// Get all appended rows (for verification).
    pub fn get_rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().unwrap().clone()
    }

    /// Number of flush calls observed.
    pub fn flush_count(&self) -> usize {
        *self.flushes.lock().unwrap()
    }

    /// Make subsequent appends fail.
    pub fn set_fail_appends(&self, fail: bool) {
        *self.fail_appends.lock().unwrap() = fail;
    }
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    fn name(&self) -> &'static str {
        "mock-records"
    }

    async fn append_row(&self, values: &[String]) -> Result<()> {
        if *self.fail_appends.lock().unwrap() {
            bail!("record store unavailable");
        }
        self.rows.lock().unwrap().push(values.to_vec());
        tracing::debug!("MockRecordStore: appended row of {} values", values.len());
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }
}
