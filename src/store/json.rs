use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::JournalResult;
use crate::models::TradeRecord;
use crate::store::{MemoryTradeStore, TradeFilter, TradeStore};

/// A TradeStore backed by a single JSON file of `{instruments, trades}`.
/// The whole file is loaded on open and rewritten on every persist.
pub struct JsonTradeStore {
    path: PathBuf,
    inner: MemoryTradeStore,
}

impl JsonTradeStore {
    /// Load `path`, or start empty if it does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> JournalResult<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            let store: MemoryTradeStore = serde_json::from_str(&content)?;
            info!(
                "Loaded {} trades and {} instruments from {}",
                store.trades.len(),
                store.instruments.len(),
                path.display()
            );
            store
        } else {
            info!("No journal at {}, starting empty", path.display());
            MemoryTradeStore::new()
        };
        Ok(Self { path, inner })
    }

    pub async fn add_instrument(&mut self, name: &str, tick_value: f64) -> JournalResult<()> {
        let mut next = self.inner.clone();
        next.add_instrument(name, tick_value);
        self.commit(next).await
    }

    /// Write `next` to disk and only then make it the live state, so a
    /// failed write leaves the store as it was.
    async fn commit(&mut self, next: MemoryTradeStore) -> JournalResult<()> {
        save(&self.path, &next).await?;
        self.inner = next;
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the journal.
async fn save(path: &Path, store: &MemoryTradeStore) -> JournalResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(store)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    debug!("Saved {} trades to {}", store.trades.len(), path.display());
    Ok(())
}

#[async_trait]
impl TradeStore for JsonTradeStore {
    async fn query_trades(&mut self, filter: &TradeFilter) -> JournalResult<Vec<TradeRecord>> {
        Ok(self.inner.filtered(filter))
    }

    async fn instrument_tick_value(&mut self, instrument: &str) -> JournalResult<Option<f64>> {
        Ok(self.inner.tick_value(instrument))
    }

    async fn persist_trade(&mut self, record: TradeRecord) -> JournalResult<TradeRecord> {
        let mut next = self.inner.clone();
        let stored = next.upsert(record);
        self.commit(next).await?;
        Ok(stored)
    }
}
