pub mod csv;
pub mod mock;
pub mod variant;

pub use csv::CsvRecordStore;
pub use mock::MockRecordStore;
pub use variant::RecordStoreVariant;
