use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::traits::RecordStore;

/// Append-only CSV record store.
/// One line per accepted submission; rows are never rewritten.
pub struct CsvRecordStore {
    path: PathBuf,
    file: Mutex<File>,
}

impl CsvRecordStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating record store directory {:?}", parent))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening record store {:?}", path))?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }
}

/// Encode one row, quoting fields that contain a delimiter, quote or
/// line break (RFC 4180).
pub(crate) fn encode_row(values: &[String]) -> String {
    values
        .iter()
        .map(|v| {
            if v.contains(&[',', '"', '\n', '\r'][..]) {
                format!("\"{}\"", v.replace('"', "\"\""))
            } else {
                v.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl RecordStore for CsvRecordStore {
    fn name(&self) -> &'static str {
        "csv-records"
    }

    async fn append_row(&self, values: &[String]) -> Result<()> {
        let mut file = self.file.lock().await;
        writeln!(file, "{}", encode_row(values))
            .with_context(|| format!("appending row to {:?}", self.path))?;
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        let mut file = self.file.lock().await;
        file.flush()?;
        file.sync_all()
            .with_context(|| format!("syncing record store {:?}", self.path))?;
        Ok(())
    }
}
