pub mod file;
pub mod http;
pub mod mock;
pub mod variant;

pub use file::FileBlobStore;
pub use http::HttpBlobStore;
pub use mock::MockBlobStore;
pub use variant::BlobStoreVariant;
