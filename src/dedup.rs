use anyhow::Result;
use tracing::debug;

use crate::traits::PropertyStore;

/// Window during which a repeated fingerprint is suppressed (1 hour).
pub const DEDUP_WINDOW_MS: i64 = 3_600_000;

/// Time-windowed already-processed guard over a durable key/value store.
///
/// Entries map fingerprint → last-processed epoch milliseconds and are
/// never deleted: a fresh acceptance overwrites the timestamp, and a stale
/// entry that never repeats is inert.
pub struct DedupCache<S: PropertyStore> {
    store: S,
    window_ms: i64,
}

impl<S: PropertyStore> DedupCache<S> {
    pub fn new(store: S, window_ms: i64) -> Self {
        Self { store, window_ms }
    }

    /// True when the fingerprint has not been processed within the window.
    ///
    /// A stored value that fails to parse is treated as epoch 0, so the
    /// submission is accepted and the entry rewritten.
    pub async fn should_process(&self, fingerprint: &str, now_ms: i64) -> Result<bool> {
        match self.store.get(fingerprint).await? {
            Some(raw) => {
                let last: i64 = raw.parse().unwrap_or(0);
                let fresh = now_ms - last < self.window_ms;
                if fresh {
                    debug!(
                        "fingerprint {} seen {}ms ago, within window",
                        fingerprint,
                        now_ms - last
                    );
                }
                Ok(!fresh)
            }
            None => Ok(true),
        }
    }

    /// Overwrite the fingerprint's timestamp. Performed as the first side
    /// effect of acceptance so redeliveries are caught even before the
    /// rest of the pipeline completes.
    pub async fn mark_processed(&self, fingerprint: &str, now_ms: i64) -> Result<()> {
        self.store.set(fingerprint, &now_ms.to_string()).await
    }
}
