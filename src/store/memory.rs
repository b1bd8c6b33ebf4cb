use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::JournalResult;
use crate::models::{Instrument, TradeRecord};
use crate::store::{TradeFilter, TradeStore};

/// A TradeStore held entirely in memory. Also the on-disk shape of
/// [`JsonTradeStore`](crate::store::JsonTradeStore).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryTradeStore {
    #[serde(default)]
    pub instruments: Vec<Instrument>,
    #[serde(default)]
    pub trades: Vec<TradeRecord>,
}

impl MemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instrument(mut self, name: &str, tick_value: f64) -> Self {
        self.add_instrument(name, tick_value);
        self
    }

    pub fn add_instrument(&mut self, name: &str, tick_value: f64) {
        match self
            .instruments
            .iter_mut()
            .find(|i| i.name.eq_ignore_ascii_case(name))
        {
            Some(existing) => existing.tick_value = tick_value,
            None => self.instruments.push(Instrument {
                name: name.to_string(),
                tick_value,
            }),
        }
    }

    pub fn filtered(&self, filter: &TradeFilter) -> Vec<TradeRecord> {
        self.trades
            .iter()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect()
    }

    pub fn tick_value(&self, instrument: &str) -> Option<f64> {
        self.instruments
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case(instrument.trim()))
            .map(|i| i.tick_value)
    }

    pub fn upsert(&mut self, mut record: TradeRecord) -> TradeRecord {
        if record.id == 0 {
            record.id = self.trades.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        }
        match self.trades.iter_mut().find(|t| t.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => self.trades.push(record.clone()),
        }
        record
    }
}

#[async_trait]
impl TradeStore for MemoryTradeStore {
    async fn query_trades(&mut self, filter: &TradeFilter) -> JournalResult<Vec<TradeRecord>> {
        Ok(self.filtered(filter))
    }

    async fn instrument_tick_value(&mut self, instrument: &str) -> JournalResult<Option<f64>> {
        Ok(self.tick_value(instrument))
    }

    async fn persist_trade(&mut self, record: TradeRecord) -> JournalResult<TradeRecord> {
        Ok(self.upsert(record))
    }
}
