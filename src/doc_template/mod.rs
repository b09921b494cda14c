pub mod file;
pub mod mock;
pub mod variant;

pub use file::FileDocTemplate;
pub use mock::MockDocTemplate;
pub use variant::DocTemplateVariant;
