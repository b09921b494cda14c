use anyhow::Result;
use async_trait::async_trait;

use super::mock::MockPropertyStore;
use super::rocks::RocksPropertyStore;
use crate::traits::PropertyStore;

/// Enum representing all possible property store implementations.
pub enum PropertyStoreVariant {
    Rocks(RocksPropertyStore),
    Mock(MockPropertyStore),
}

#[async_trait]
impl PropertyStore for PropertyStoreVariant {
    fn name(&self) -> &'static str {
        match self {
            PropertyStoreVariant::Rocks(inner) => inner.name(),
            PropertyStoreVariant::Mock(inner) => inner.name(),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            PropertyStoreVariant::Rocks(inner) => inner.get(key).await,
            PropertyStoreVariant::Mock(inner) => inner.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            PropertyStoreVariant::Rocks(inner) => inner.set(key, value).await,
            PropertyStoreVariant::Mock(inner) => inner.set(key, value).await,
        }
    }
}
