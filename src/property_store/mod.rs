pub mod mock;
pub mod rocks;
pub mod variant;

pub use mock::MockPropertyStore;
pub use rocks::RocksPropertyStore;
pub use variant::PropertyStoreVariant;
