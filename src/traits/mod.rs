pub mod blob_store;
pub mod doc_template;
pub mod property_store;
pub mod record_store;
pub mod workbook;

pub use blob_store::BlobStore;
pub use doc_template::DocTemplate;
pub use property_store::PropertyStore;
pub use record_store::RecordStore;
pub use workbook::Workbook;

use thiserror::Error;

/// Errors raised at the adapter boundary for working-object handles.
#[derive(Debug, Error)]
pub enum HandleError {
    #[error("unknown document handle: {0}")]
    UnknownDoc(String),

    #[error("unknown workbook handle: {0}")]
    UnknownWorkbook(String),

    #[error("handle already trashed: {0}")]
    Trashed(String),
}
