pub mod filter;
pub mod json;
pub mod memory;

pub use filter::{ConfluenceLogic, TradeFilter};
pub use json::JsonTradeStore;
pub use memory::MemoryTradeStore;

use async_trait::async_trait;

use crate::errors::JournalResult;
use crate::models::TradeRecord;

/// The relational store the journal reads trades from and writes them to.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Trades matching `filter`, in stored order.
    async fn query_trades(&mut self, filter: &TradeFilter) -> JournalResult<Vec<TradeRecord>>;

    /// Tick value of an instrument by name, `None` if it is not registered.
    async fn instrument_tick_value(&mut self, instrument: &str) -> JournalResult<Option<f64>>;

    /// Insert or update by id. Id `0` allocates a new one; the stored record is returned.
    async fn persist_trade(&mut self, record: TradeRecord) -> JournalResult<TradeRecord>;
}
