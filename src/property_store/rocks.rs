use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use rocksdb::{Options, DB};

use crate::traits::PropertyStore;

/// RocksDB-backed durable key/value store.
/// Backs the dedup cache so the 1-hour guard survives process restarts.
pub struct RocksPropertyStore {
    db: Arc<DB>,
}

impl RocksPropertyStore {
    pub fn open(path: &str) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)
            .with_context(|| format!("opening property store at {path}"))?;
        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl PropertyStore for RocksPropertyStore {
    fn name(&self) -> &'static str {
        "rocksdb-properties"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.db.get(key.as_bytes())? {
            Some(raw) => {
                let value = String::from_utf8(raw)
                    .with_context(|| format!("non-utf8 property value for key {key}"))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db.put(key.as_bytes(), value.as_bytes())?;
        Ok(())
    }
}
