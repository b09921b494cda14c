pub mod file;
pub mod mock;
pub mod variant;

pub use file::FileWorkbook;
pub use mock::MockWorkbook;
pub use variant::WorkbookVariant;
