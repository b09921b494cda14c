use anyhow::Result;
use async_trait::async_trait;

use super::csv::CsvRecordStore;
use super::mock::MockRecordStore;
use crate::traits::RecordStore;

/// Enum representing all possible record store implementations.
pub enum RecordStoreVariant {
    Csv(CsvRecordStore),
    Mock(MockRecordStore),
}

#[async_trait]
impl RecordStore for RecordStoreVariant {
    fn name(&self) -> &'static str {
        match self {
            RecordStoreVariant::Csv(inner) => inner.name(),
            RecordStoreVariant::Mock(inner) => inner.name(),
        }
    }

    async fn append_row(&self, values: &[String]) -> Result<()> {
        match self {
            RecordStoreVariant::Csv(inner) => inner.append_row(values).await,
            RecordStoreVariant::Mock(inner) => inner.append_row(values).await,
        }
    }

    async fn flush(&self) -> Result<()> {
        match self {
            RecordStoreVariant::Csv(inner) => inner.flush().await,
            RecordStoreVariant::Mock(inner) => inner.flush().await,
        }
    }
}
