use serde::{Deserialize, Serialize};

use crate::models::{ScoreCard, TradeRecord};

/// Raw inputs the derived fields depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivationInput {
    pub entry: Option<f64>,
    pub stop: Option<f64>,
    pub target: Option<f64>,
    pub exit: Option<f64>,
    pub tick_value: Option<f64>,
    pub scores: ScoreCard,
}

impl DerivationInput {
    pub fn from_record(record: &TradeRecord, tick_value: Option<f64>) -> Self {
        Self {
            entry: record.entry,
            stop: record.stop,
            target: record.target,
            exit: record.exit,
            tick_value,
            scores: record.scores,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedFields {
    /// |entry - stop| in ticks, 0 when not computable.
    pub stop_ticks: f64,
    /// Planned reward-to-risk, 0 when not computable.
    pub pot_result: f64,
    /// Realized R-multiple, only once the trade has an exit.
    pub result: Option<f64>,
    /// Mean of the six scores, only when all six are set.
    pub average: Option<f64>,
}

impl DerivedFields {
    pub fn apply_to(&self, record: &mut TradeRecord) {
        record.stop_ticks = self.stop_ticks;
        record.pot_result = self.pot_result;
        record.result = self.result;
        record.average = self.average;
    }
}

/// Compute every derived field of a trade. Total: malformed or missing
/// inputs map to 0 / `None`, never to NaN or a panic.
///
/// The engine is direction-agnostic; `exit` and `target` are expected to
/// already be oriented so that a positive result is a profit.
pub fn derive_trade_metrics(input: &DerivationInput) -> DerivedFields {
    let risk = match (input.entry, input.stop) {
        (Some(entry), Some(stop)) => Some((entry - stop).abs()),
        _ => None,
    };

    let stop_ticks = match (risk, input.tick_value) {
        (Some(risk), Some(tick)) if tick > 0.0 => finite_or_zero(risk / tick),
        _ => 0.0,
    };

    let pot_result = match (input.entry, input.target, risk) {
        (Some(entry), Some(target), Some(risk)) if risk > 0.0 => {
            finite_or_zero((target - entry).abs() / risk)
        }
        _ => 0.0,
    };

    let result = match (input.entry, input.exit, risk) {
        (Some(entry), Some(exit), Some(risk)) if risk > 0.0 => {
            Some((exit - entry) / risk).filter(|r| r.is_finite())
        }
        _ => None,
    };

    let average = input.scores.complete().map(|scores| {
        scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64
    });

    DerivedFields {
        stop_ticks,
        pot_result,
        result,
        average,
    }
}

/// Re-derive a stored record in place.
pub fn derive_record(record: &mut TradeRecord, tick_value: Option<f64>) -> DerivedFields {
    let fields = derive_trade_metrics(&DerivationInput::from_record(record, tick_value));
    fields.apply_to(record);
    fields
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() && x >= 0.0 {
        x
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_trade;

    fn input(entry: f64, stop: f64, target: f64, exit: Option<f64>) -> DerivationInput {
        DerivationInput {
            entry: Some(entry),
            stop: Some(stop),
            target: Some(target),
            exit,
            tick_value: Some(0.25),
            scores: ScoreCard::default(),
        }
    }

    #[test]
    fn long_trade_metrics() {
        let out = derive_trade_metrics(&input(100.0, 98.0, 106.0, Some(104.0)));
        assert_eq!(out.stop_ticks, 8.0);
        assert_eq!(out.pot_result, 3.0);
        assert_eq!(out.result, Some(2.0));
        assert_eq!(out.average, None);
    }

    #[test]
    fn losing_exit_is_negative() {
        let out = derive_trade_metrics(&input(100.0, 98.0, 106.0, Some(98.0)));
        assert_eq!(out.result, Some(-1.0));
    }

    #[test]
    fn open_trade_has_no_result() {
        let out = derive_trade_metrics(&input(100.0, 98.0, 106.0, None));
        assert_eq!(out.result, None);
        assert_eq!(out.pot_result, 3.0);
    }

    #[test]
    fn entry_equal_stop_falls_back_to_zero() {
        let out = derive_trade_metrics(&input(100.0, 100.0, 106.0, Some(103.0)));
        assert_eq!(out.stop_ticks, 0.0);
        assert_eq!(out.pot_result, 0.0);
        assert_eq!(out.result, None);
    }

    #[test]
    fn missing_or_bad_tick_value() {
        let mut i = input(100.0, 98.0, 106.0, None);
        i.tick_value = None;
        assert_eq!(derive_trade_metrics(&i).stop_ticks, 0.0);
        i.tick_value = Some(0.0);
        assert_eq!(derive_trade_metrics(&i).stop_ticks, 0.0);
        i.tick_value = Some(-0.25);
        assert_eq!(derive_trade_metrics(&i).stop_ticks, 0.0);
    }

    #[test]
    fn missing_prices_never_nan() {
        let out = derive_trade_metrics(&DerivationInput::default());
        assert_eq!(out.stop_ticks, 0.0);
        assert_eq!(out.pot_result, 0.0);
        assert_eq!(out.result, None);

        let mut i = input(f64::NAN, 98.0, 106.0, Some(100.0));
        i.tick_value = Some(0.25);
        let out = derive_trade_metrics(&i);
        assert_eq!(out.stop_ticks, 0.0);
        assert_eq!(out.pot_result, 0.0);
        assert_eq!(out.result, None);
    }

    #[test]
    fn average_only_when_all_scores_set() {
        let mut i = input(100.0, 98.0, 106.0, None);
        i.scores = ScoreCard::new(6, 7, 8, 9, 10, 8);
        assert_eq!(derive_trade_metrics(&i).average, Some(8.0));

        i.scores.management = None;
        assert_eq!(derive_trade_metrics(&i).average, None);

        i.scores.management = Some(0);
        assert_eq!(derive_trade_metrics(&i).average, None);
    }

    #[test]
    fn average_is_exact_mean() {
        let mut i = DerivationInput::default();
        i.scores = ScoreCard::new(1, 2, 3, 4, 5, 6);
        assert_eq!(derive_trade_metrics(&i).average, Some(3.5));
    }

    #[test]
    fn deriving_twice_is_idempotent() {
        let mut t = make_trade("2024-01-15", "04:10", None);
        t.entry = Some(17950.0);
        t.stop = Some(17940.0);
        t.target = Some(17980.0);
        t.exit = Some(17965.0);
        t.scores = ScoreCard::new(7, 7, 8, 6, 9, 5);

        let first = derive_record(&mut t, Some(0.25));
        let second = derive_record(&mut t, Some(0.25));
        assert_eq!(first, second);
        assert_eq!(t.stop_ticks, 40.0);
        assert_eq!(t.result, Some(1.5));
    }
}
