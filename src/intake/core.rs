//! The per-request intake pipeline and its bounded-wait lock wrapper.
//!
//! One request at a time: a process-wide mutex held across the whole
//! handler body is the sole mechanism preventing duplicate rows and
//! artifacts under concurrent webhook delivery.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::blob_store::{BlobStoreVariant, FileBlobStore, HttpBlobStore};
use crate::config::BaseConfig;
use crate::dedup::DedupCache;
use crate::doc_template::{DocTemplateVariant, FileDocTemplate};
use crate::docgen;
use crate::format;
use crate::property_store::{PropertyStoreVariant, RocksPropertyStore};
use crate::record_store::{CsvRecordStore, RecordStoreVariant};
use crate::sheet_export;
use crate::traits::RecordStore;
use crate::types::WebhookPayload;
use crate::workbook::{FileWorkbook, WorkbookVariant};

/// Reply for a request that could not take the pipeline lock in time.
pub const RESPONSE_BUSY: &str = "Busy";
/// Reply for a submission suppressed by the dedup window.
pub const RESPONSE_DUPLICATE: &str = "Duplicado (Cache 1h) - Ignorado";
/// Reply for a fully processed submission.
pub const RESPONSE_SUCCESS: &str = "Sucesso";

/// Terminal state of an accepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Row appended and both artifacts generated.
    Accepted,
    /// Fingerprint seen within the dedup window; nothing was written.
    Duplicate,
}

/// The deduplicate → persist → generate pipeline over the collaborator
/// variants. Runs only under the service lock.
pub struct IntakePipeline {
    pub dedup: DedupCache<PropertyStoreVariant>,
    pub records: RecordStoreVariant,
    pub templates: DocTemplateVariant,
    pub workbooks: WorkbookVariant,
    pub blobs: BlobStoreVariant,
}

impl IntakePipeline {
    pub fn new(
        dedup: DedupCache<PropertyStoreVariant>,
        records: RecordStoreVariant,
        templates: DocTemplateVariant,
        workbooks: WorkbookVariant,
        blobs: BlobStoreVariant,
    ) -> Self {
        Self {
            dedup,
            records,
            templates,
            workbooks,
            blobs,
        }
    }

    /// Process one webhook body end to end.
    ///
    /// Effects are sequenced, not transactional: the cache mark lands
    /// first, then the row, then the artifacts. A failure mid-pipeline
    /// leaves the earlier effects in place.
    pub async fn process(&self, body: &[u8]) -> Result<Outcome> {
        let payload: WebhookPayload =
            serde_json::from_slice(body).context("invalid webhook payload")?;
        let mut submission = payload.data;
        format::normalize_identifiers(&mut submission);

        let fingerprint = submission.fingerprint();
        let now_ms = Utc::now().timestamp_millis();
        if !self.dedup.should_process(&fingerprint, now_ms).await? {
            info!("duplicate submission suppressed: {fingerprint}");
            return Ok(Outcome::Duplicate);
        }
        self.dedup
            .mark_processed(&fingerprint, now_ms)
            .await
            .context("marking fingerprint processed")?;

        let stamped_at = Utc::now();
        self.records
            .append_row(&submission.row_values(stamped_at))
            .await
            .context("appending record row")?;
        // The row must be durable before artifact generation relies on it.
        self.records
            .flush()
            .await
            .context("flushing record store")?;

        docgen::generate_document(&self.templates, &self.blobs, &submission).await?;
        sheet_export::export_workbook(&self.workbooks, &self.blobs, &submission).await?;

        info!("submission processed: {}", submission.base_name());
        Ok(Outcome::Accepted)
    }
}

/// The webhook-facing service: serializes pipeline runs behind one mutex
/// with a bounded acquisition wait.
pub struct IntakeService {
    pub pipeline: Arc<tokio::sync::Mutex<IntakePipeline>>,
    pub lock_wait: Duration,
}

impl IntakeService {
    pub fn new(pipeline: IntakePipeline, lock_wait: Duration) -> Self {
        Self {
            pipeline: Arc::new(tokio::sync::Mutex::new(pipeline)),
            lock_wait,
        }
    }

    /// Wire the production adapters from configuration.
    pub fn initialize(config: &BaseConfig) -> Result<Self> {
        let properties = PropertyStoreVariant::Rocks(RocksPropertyStore::open(&config.dedup_path)?);
        info!("dedup cache opened at: {}", config.dedup_path);

        let blobs = match &config.artifact_upload_url {
            Some(url) => {
                info!("artifacts will be uploaded to: {url}");
                BlobStoreVariant::Http(HttpBlobStore::new(
                    url.clone(),
                    config.artifact_auth_token.clone(),
                ))
            }
            None => BlobStoreVariant::File(FileBlobStore::new(config.output_dir.clone())),
        };

        let window_ms = (config.dedup_window_secs as i64).saturating_mul(1000);
        let pipeline = IntakePipeline::new(
            DedupCache::new(properties, window_ms),
            RecordStoreVariant::Csv(CsvRecordStore::open(config.records_path.clone())?),
            DocTemplateVariant::File(FileDocTemplate::new(
                config.template_path.clone(),
                config.work_dir.clone(),
            )),
            WorkbookVariant::File(FileWorkbook::new(config.work_dir.clone())),
            blobs,
        );
        Ok(Self::new(
            pipeline,
            Duration::from_secs(config.lock_wait_secs),
        ))
    }

    /// Handle one webhook request body and produce the plain-text reply.
    ///
    /// The lock is released by guard drop on every exit path.
    pub async fn handle(&self, body: &[u8]) -> String {
        let guard = match tokio::time::timeout(self.lock_wait, self.pipeline.lock()).await {
            Ok(guard) => guard,
            Err(_) => {
                warn!(
                    "pipeline lock not acquired within {:?}, answering busy",
                    self.lock_wait
                );
                return RESPONSE_BUSY.to_string();
            }
        };

        match guard.process(body).await {
            Ok(Outcome::Accepted) => RESPONSE_SUCCESS.to_string(),
            Ok(Outcome::Duplicate) => RESPONSE_DUPLICATE.to_string(),
            Err(e) => {
                error!("pipeline failed: {e:#}");
                format!("Erro: {e:#}")
            }
        }
    }
}
