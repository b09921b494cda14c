// Library exports for testing and external use

pub mod blob_store;
pub mod config;
pub mod dedup;
pub mod doc_template;
pub mod docgen;
pub mod format;
pub mod intake;
pub mod property_store;
pub mod record_store;
pub mod server;
pub mod sheet_export;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod workbook;

// Re-export commonly used types and traits
pub use config::BaseConfig;
pub use dedup::{DedupCache, DEDUP_WINDOW_MS};
pub use intake::{IntakePipeline, IntakeService, Outcome};
pub use server::WebhookServer;
pub use traits::{BlobStore, DocTemplate, PropertyStore, RecordStore, Workbook};
pub use types::{Submission, WebhookPayload, ROW_COLUMNS, ROW_WIDTH};

// Re-export variant enums for convenience
pub use blob_store::{BlobStoreVariant, MockBlobStore};
pub use doc_template::{DocTemplateVariant, MockDocTemplate};
pub use property_store::{MockPropertyStore, PropertyStoreVariant};
pub use record_store::{MockRecordStore, RecordStoreVariant};
pub use workbook::{MockWorkbook, WorkbookVariant};
