use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{ConfirmationType, Direction, Session, TradeStatus, TradingDay};

/// A closed trade whose |R| is below this counts as break-even. Fixed, not configurable.
pub const BREAK_EVEN_THRESHOLD: f64 = 0.1;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;

/// The six subjective 1-10 ratings a trader gives each trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub preparation: Option<u8>,
    pub entry: Option<u8>,
    pub stop_loss: Option<u8>,
    pub target: Option<u8>,
    pub management: Option<u8>,
    pub rules: Option<u8>,
}

impl ScoreCard {
    pub fn new(
        preparation: u8,
        entry: u8,
        stop_loss: u8,
        target: u8,
        management: u8,
        rules: u8,
    ) -> Self {
        Self {
            preparation: Some(preparation),
            entry: Some(entry),
            stop_loss: Some(stop_loss),
            target: Some(target),
            management: Some(management),
            rules: Some(rules),
        }
    }

    pub fn values(&self) -> [Option<u8>; 6] {
        [
            self.preparation,
            self.entry,
            self.stop_loss,
            self.target,
            self.management,
            self.rules,
        ]
    }

    /// All six scores, or `None` if any is missing or outside 1..=10.
    /// A stored `0` is therefore treated as "not provided".
    pub fn complete(&self) -> Option<[u8; 6]> {
        let mut out = [0u8; 6];
        for (slot, value) in out.iter_mut().zip(self.values()) {
            match value {
                Some(v) if (MIN_SCORE..=MAX_SCORE).contains(&v) => *slot = v,
                _ => return None,
            }
        }
        Some(out)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub name: String,
    pub tick_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub id: u64,
    pub date: NaiveDate,
    pub day: TradingDay,
    pub session: Session,
    pub direction: Direction,
    #[serde(default)]
    pub status: TradeStatus,
    pub instrument_name: String,
    #[serde(default)]
    pub entry_method_name: String,
    pub confirmation_type: ConfirmationType,
    #[serde(default)]
    pub account_name: String,
    /// `HH:MM`
    #[serde(default)]
    pub confirmation_time: String,
    /// `HH:MM`
    #[serde(default)]
    pub entry_time: String,

    pub entry: Option<f64>,
    pub stop: Option<f64>,
    pub target: Option<f64>,
    pub exit: Option<f64>,

    #[serde(default)]
    pub scores: ScoreCard,
    #[serde(default)]
    pub confluences: Vec<String>,
    #[serde(default)]
    pub notes: String,

    // Derived on every save
    #[serde(default)]
    pub stop_ticks: f64,
    #[serde(default)]
    pub pot_result: f64,
    #[serde(default)]
    pub result: Option<f64>,
    #[serde(default)]
    pub average: Option<f64>,
}

impl TradeRecord {
    pub fn is_break_even(&self) -> bool {
        self.result
            .map_or(false, |r| r.abs() < BREAK_EVEN_THRESHOLD)
    }

    pub fn confirmation_clock(&self) -> Option<NaiveTime> {
        parse_clock(&self.confirmation_time)
    }

    pub fn entry_clock(&self) -> Option<NaiveTime> {
        parse_clock(&self.entry_time)
    }

    /// (year, month) of the trade date.
    pub fn month(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }
}

/// Parse a time-of-day string, accepting `HH:MM` and `HH:MM:SS`.
pub fn parse_clock(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}
