use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::core::sessions::{self, SessionWindow};
use crate::models::{
    ConfirmationType, Direction, Session, TradeRecord, TradeStatus, TradingDay,
};

/// Stop distance ranges in ticks, each labelled by its inclusive upper bound.
pub const STOP_LOSS_RANGES: [&str; 7] = ["0-5", "6-10", "11-15", "16-20", "21-25", "26-30", "31+"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Session,
    Instrument,
    ConfirmationType,
    EntryMethod,
    Day,
    Month,
    StopLossRange,
    ConfirmationTime,
    EntryTime,
    Direction,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Dimension {
    pub const ALL: [Dimension; 10] = [
        Dimension::Session,
        Dimension::Instrument,
        Dimension::ConfirmationType,
        Dimension::EntryMethod,
        Dimension::Day,
        Dimension::Month,
        Dimension::StopLossRange,
        Dimension::ConfirmationTime,
        Dimension::EntryTime,
        Dimension::Direction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Session => "session",
            Dimension::Instrument => "instrument",
            Dimension::ConfirmationType => "confirmation_type",
            Dimension::EntryMethod => "entry_method",
            Dimension::Day => "day",
            Dimension::Month => "month",
            Dimension::StopLossRange => "stop_loss_range",
            Dimension::ConfirmationTime => "confirmation_time",
            Dimension::EntryTime => "entry_time",
            Dimension::Direction => "direction",
        }
    }

    /// Whether zero-count groups of a fixed key domain are suppressed.
    /// Dynamic dimensions never produce empty groups.
    pub fn drop_empty(&self) -> bool {
        matches!(
            self,
            Dimension::ConfirmationType | Dimension::StopLossRange | Dimension::Direction
        )
    }

    /// Grouping levels, outermost first. Only Direction drills down.
    pub fn drill_path(&self) -> &'static [Dimension] {
        match self {
            Dimension::Session => &[Dimension::Session],
            Dimension::Instrument => &[Dimension::Instrument],
            Dimension::ConfirmationType => &[Dimension::ConfirmationType],
            Dimension::EntryMethod => &[Dimension::EntryMethod],
            Dimension::Day => &[Dimension::Day],
            Dimension::Month => &[Dimension::Month],
            Dimension::StopLossRange => &[Dimension::StopLossRange],
            Dimension::ConfirmationTime => &[Dimension::ConfirmationTime],
            Dimension::EntryTime => &[Dimension::EntryTime],
            Dimension::Direction => &[Dimension::Direction, Dimension::Day, Dimension::Session],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationBucket {
    pub key: String,
    pub trade_count: usize,
    pub winners: usize,
    pub losers: usize,
    pub break_even: usize,
    pub win_rate_percent: f64,
    pub total_r: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<AggregationBucket>,
}

impl AggregationBucket {
    pub fn from_trades(key: impl Into<String>, trades: &[&TradeRecord]) -> Self {
        let trade_count = trades.len();
        let winners = trades
            .iter()
            .filter(|t| t.status == TradeStatus::Winner)
            .count();
        let losers = trades
            .iter()
            .filter(|t| t.status == TradeStatus::Expense)
            .count();
        let break_even = trades.iter().filter(|t| t.is_break_even()).count();

        let win_rate_percent = if trade_count > 0 {
            winners as f64 / trade_count as f64 * 100.0
        } else {
            0.0
        };

        Self {
            key: key.into(),
            trade_count,
            winners,
            losers,
            break_even,
            win_rate_percent,
            total_r: trades.iter().map(|t| t.result.unwrap_or(0.0)).sum(),
            details: Vec::new(),
        }
    }
}

/// Group `trades` by `dimension` and reduce each group to a bucket.
/// Never fails: empty input yields either no buckets or zero-count buckets,
/// per [`Dimension::drop_empty`].
pub fn aggregate_by(trades: &[TradeRecord], dimension: Dimension) -> Vec<AggregationBucket> {
    let refs: Vec<&TradeRecord> = trades.iter().collect();
    let buckets = aggregate_path(&refs, dimension.drill_path());
    debug!(
        "Aggregated {} trades by {} into {} buckets",
        trades.len(),
        dimension,
        buckets.len()
    );
    buckets
}

/// Every dimension, in [`Dimension::ALL`] order.
pub fn aggregate_all(trades: &[TradeRecord]) -> Vec<(Dimension, Vec<AggregationBucket>)> {
    Dimension::ALL
        .iter()
        .map(|&d| (d, aggregate_by(trades, d)))
        .collect()
}

fn aggregate_path(trades: &[&TradeRecord], path: &[Dimension]) -> Vec<AggregationBucket> {
    let Some((&dimension, rest)) = path.split_first() else {
        return Vec::new();
    };

    group(trades, dimension)
        .into_iter()
        .filter(|(_, members)| !(dimension.drop_empty() && members.is_empty()))
        .map(|(key, members)| {
            let mut bucket = AggregationBucket::from_trades(key, &members);
            bucket.details = aggregate_path(&members, rest);
            bucket
        })
        .collect()
}

fn group<'a>(
    trades: &[&'a TradeRecord],
    dimension: Dimension,
) -> Vec<(String, Vec<&'a TradeRecord>)> {
    match dimension {
        Dimension::Session => fixed(trades, &Session::ALL, |t| Some(t.session), Session::to_string),
        Dimension::Day => fixed(trades, &TradingDay::ALL, |t| Some(t.day), TradingDay::to_string),
        Dimension::Direction => {
            fixed(trades, &Direction::ALL, |t| Some(t.direction), Direction::to_string)
        }
        Dimension::ConfirmationType => fixed(
            trades,
            &ConfirmationType::ALL,
            |t| Some(t.confirmation_type),
            ConfirmationType::to_string,
        ),
        Dimension::StopLossRange => fixed(
            trades,
            &STOP_LOSS_RANGES,
            |t| Some(stop_loss_range(t.stop_ticks)),
            |label| label.to_string(),
        ),
        Dimension::ConfirmationTime => fixed(
            trades,
            &sessions::all_slots(),
            |t| time_slot(t.session, t.confirmation_clock()),
            slot_label,
        ),
        Dimension::EntryTime => fixed(
            trades,
            &sessions::all_slots(),
            |t| time_slot(t.session, t.entry_clock()),
            slot_label,
        ),
        Dimension::Instrument => by_label(trades, |t| &t.instrument_name),
        Dimension::EntryMethod => by_label(trades, |t| &t.entry_method_name),
        Dimension::Month => dynamic(trades, TradeRecord::month)
            .into_iter()
            .map(|((year, month), members)| (month_label(year, month), members))
            .collect(),
    }
}

/// Group over a closed key domain, emitting every key in domain order.
fn fixed<'a, K, F, L>(
    trades: &[&'a TradeRecord],
    keys: &[K],
    key_of: F,
    label: L,
) -> Vec<(String, Vec<&'a TradeRecord>)>
where
    K: PartialEq,
    F: Fn(&TradeRecord) -> Option<K>,
    L: Fn(&K) -> String,
{
    let mut groups: Vec<Vec<&'a TradeRecord>> = vec![Vec::new(); keys.len()];
    for &t in trades {
        let idx = key_of(t).and_then(|k| keys.iter().position(|candidate| *candidate == k));
        if let Some(idx) = idx {
            groups[idx].push(t);
        }
    }
    keys.iter().map(label).zip(groups).collect()
}

/// Group over the distinct keys present, sorted ascending.
fn dynamic<'a, K, F>(trades: &[&'a TradeRecord], key_of: F) -> Vec<(K, Vec<&'a TradeRecord>)>
where
    K: Ord,
    F: Fn(&TradeRecord) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a TradeRecord>> = BTreeMap::new();
    for &t in trades {
        groups.entry(key_of(t)).or_default().push(t);
    }
    groups.into_iter().collect()
}

pub fn stop_loss_range(stop_ticks: f64) -> &'static str {
    let idx = if stop_ticks <= 5.0 {
        0
    } else if stop_ticks <= 10.0 {
        1
    } else if stop_ticks <= 15.0 {
        2
    } else if stop_ticks <= 20.0 {
        3
    } else if stop_ticks <= 25.0 {
        4
    } else if stop_ticks <= 30.0 {
        5
    } else {
        6
    };
    STOP_LOSS_RANGES[idx]
}

fn time_slot(session: Session, clock: Option<NaiveTime>) -> Option<(Session, NaiveTime)> {
    let slot = SessionWindow::for_session(session).slot_for(clock?)?;
    Some((session, slot))
}

fn slot_label(slot: &(Session, NaiveTime)) -> String {
    slot.1.format("%H:%M").to_string()
}

/// Group by a free-text label, ignoring case and surrounding whitespace the
/// same way the store's filters do. A group is shown with the spelling of
/// its first trade; blank labels group as `Unknown`, sorted last.
fn by_label<'a, F>(trades: &[&'a TradeRecord], label_of: F) -> Vec<(String, Vec<&'a TradeRecord>)>
where
    F: Fn(&TradeRecord) -> &str,
{
    let grouped = dynamic(trades, |t| {
        let key = label_of(t).trim().to_lowercase();
        (key.is_empty(), key)
    });
    grouped
        .into_iter()
        .map(|((blank, key), members)| {
            let label = if blank {
                "Unknown".to_string()
            } else {
                members
                    .first()
                    .map(|t| label_of(t).trim().to_string())
                    .unwrap_or(key)
            };
            (label, members)
        })
        .collect()
}

/// `2024-01` -> `Jan 2024`
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}
