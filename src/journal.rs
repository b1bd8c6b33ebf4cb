use tracing::{debug, info, warn};

use crate::core::derivation::{derive_record, DerivedFields};
use crate::core::sessions::SessionWindow;
use crate::errors::JournalResult;
use crate::models::TradeRecord;
use crate::reporting::PerformanceReport;
use crate::store::{TradeFilter, TradeStore};

/// Ties a trade store to the derivation and aggregation engines.
pub struct Journal {
    store: Box<dyn TradeStore>,
}

impl Journal {
    pub fn new(store: Box<dyn TradeStore>) -> Self {
        Self { store }
    }

    /// Derive the computed fields of a created or edited trade and persist it.
    pub async fn save_trade(&mut self, mut record: TradeRecord) -> JournalResult<TradeRecord> {
        let tick_value = self.tick_value_for(&record).await?;
        warn_outside_session(&record);

        let fields = derive_record(&mut record, tick_value);
        let stored = self.store.persist_trade(record).await?;
        info!(
            "Saved trade #{} {} {} {} | stop {:.1} ticks | pot {:.2}R | result {}",
            stored.id,
            stored.date,
            stored.instrument_name,
            stored.direction,
            fields.stop_ticks,
            fields.pot_result,
            fields
                .result
                .map_or_else(|| "open".to_string(), |r| format!("{:+.2}R", r))
        );
        Ok(stored)
    }

    /// Re-derive every stored trade, persisting only those whose derived
    /// fields changed. Returns how many were updated.
    pub async fn recompute_all(&mut self) -> JournalResult<usize> {
        let trades = self.store.query_trades(&TradeFilter::all()).await?;
        let total = trades.len();
        let mut updated = 0;

        for mut record in trades {
            let before = DerivedFields {
                stop_ticks: record.stop_ticks,
                pot_result: record.pot_result,
                result: record.result,
                average: record.average,
            };
            let tick_value = self.tick_value_for(&record).await?;
            let after = derive_record(&mut record, tick_value);
            if after != before {
                debug!("Trade #{} derived fields changed: {:?} -> {:?}", record.id, before, after);
                self.store.persist_trade(record).await?;
                updated += 1;
            }
        }

        info!("Recomputed {} trades, {} updated", total, updated);
        Ok(updated)
    }

    /// Query the store and aggregate on a blocking worker. A superseded
    /// report can simply be dropped by the caller.
    pub async fn report(&mut self, filter: TradeFilter) -> JournalResult<PerformanceReport> {
        let trades = self.store.query_trades(&filter).await?;
        info!("Building report over {} trades", trades.len());
        let report =
            tokio::task::spawn_blocking(move || PerformanceReport::build(&trades, filter)).await?;
        Ok(report)
    }

    async fn tick_value_for(&mut self, record: &TradeRecord) -> JournalResult<Option<f64>> {
        let tick_value = self
            .store
            .instrument_tick_value(&record.instrument_name)
            .await?;
        if tick_value.is_none() {
            warn!(
                "No tick value for instrument {:?}, stop ticks will be 0",
                record.instrument_name
            );
        }
        Ok(tick_value)
    }
}

fn warn_outside_session(record: &TradeRecord) {
    let window = SessionWindow::for_session(record.session);
    for (label, clock) in [
        ("confirmation", record.confirmation_clock()),
        ("entry", record.entry_clock()),
    ] {
        if let Some(t) = clock {
            if !window.contains(t) {
                warn!(
                    "Trade {} {} time {} is outside the {} window",
                    record.date, label, t, record.session
                );
            }
        }
    }
}
