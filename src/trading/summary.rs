use serde::{Deserialize, Serialize};

use crate::models::{TradeRecord, TradeStatus};
use crate::trading::streaks::{compute_streaks, StreakSummary};

/// Headline numbers for the dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub total_trades: usize,
    pub closed_trades: usize,
    pub winners: usize,
    pub losers: usize,
    pub break_even: usize,
    pub win_rate_percent: f64,
    pub total_r: f64,
    pub avg_r: f64,
    pub best_r: f64,
    pub worst_r: f64,
    pub avg_score: Option<f64>,
    pub streaks: StreakSummary,
}

impl PerformanceSummary {
    pub fn from_trades(trades: &[TradeRecord]) -> Self {
        let total_trades = trades.len();
        let results: Vec<f64> = trades.iter().filter_map(|t| t.result).collect();
        let closed_trades = results.len();

        let winners = trades
            .iter()
            .filter(|t| t.status == TradeStatus::Winner)
            .count();
        let losers = trades
            .iter()
            .filter(|t| t.status == TradeStatus::Expense)
            .count();
        let break_even = trades.iter().filter(|t| t.is_break_even()).count();

        let win_rate_percent = if total_trades > 0 {
            winners as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        let total_r: f64 = results.iter().sum();
        let avg_r = if closed_trades > 0 {
            total_r / closed_trades as f64
        } else {
            0.0
        };
        let best_r = results.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst_r = results.iter().copied().fold(f64::INFINITY, f64::min);

        let scores: Vec<f64> = trades.iter().filter_map(|t| t.average).collect();
        let avg_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        Self {
            total_trades,
            closed_trades,
            winners,
            losers,
            break_even,
            win_rate_percent,
            total_r,
            avg_r,
            best_r: if closed_trades > 0 { best_r } else { 0.0 },
            worst_r: if closed_trades > 0 { worst_r } else { 0.0 },
            avg_score,
            streaks: compute_streaks(trades),
        }
    }
}
