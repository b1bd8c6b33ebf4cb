use serde::{Deserialize, Serialize};

use crate::models::{TradeRecord, TradeStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakOutcome {
    Win,
    Loss,
    BreakEven,
}

/// Break-even by result takes precedence over the recorded status.
/// Open or unclassified trades have no outcome.
pub fn classify(trade: &TradeRecord) -> Option<StreakOutcome> {
    if trade.is_break_even() {
        return Some(StreakOutcome::BreakEven);
    }
    match trade.status {
        TradeStatus::Winner => Some(StreakOutcome::Win),
        TradeStatus::Expense => Some(StreakOutcome::Loss),
        TradeStatus::BreakEven | TradeStatus::Unset => None,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub max_win_streak: usize,
    pub max_loss_streak: usize,
    pub max_break_even_streak: usize,
    pub current_win_streak: usize,
    pub current_loss_streak: usize,
    pub current_break_even_streak: usize,
}

/// Trades ordered by (date, confirmation time). The sort is stable, so trades
/// sharing a timestamp keep their input order; unparsable times sort first.
pub fn chronological(trades: &[TradeRecord]) -> Vec<&TradeRecord> {
    let mut ordered: Vec<&TradeRecord> = trades.iter().collect();
    ordered.sort_by_key(|t| (t.date, t.confirmation_clock()));
    ordered
}

pub fn compute_streaks(trades: &[TradeRecord]) -> StreakSummary {
    let mut s = StreakSummary::default();

    for trade in chronological(trades) {
        let Some(outcome) = classify(trade) else {
            continue;
        };
        match outcome {
            StreakOutcome::Win => {
                s.current_win_streak += 1;
                s.current_loss_streak = 0;
                s.current_break_even_streak = 0;
            }
            StreakOutcome::Loss => {
                s.current_loss_streak += 1;
                s.current_win_streak = 0;
                s.current_break_even_streak = 0;
            }
            StreakOutcome::BreakEven => {
                s.current_break_even_streak += 1;
                s.current_win_streak = 0;
                s.current_loss_streak = 0;
            }
        }
        s.max_win_streak = s.max_win_streak.max(s.current_win_streak);
        s.max_loss_streak = s.max_loss_streak.max(s.current_loss_streak);
        s.max_break_even_streak = s.max_break_even_streak.max(s.current_break_even_streak);
    }

    s
}
