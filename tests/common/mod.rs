use chrono::{Datelike, NaiveDate};

use trade_journal::models::{
    ConfirmationType, Direction, ScoreCard, Session, TradeRecord, TradeStatus, TradingDay,
};

/// A raw, not-yet-derived trade as the entry form would submit it.
pub fn raw_trade(
    date: &str,
    session: Session,
    time: &str,
    direction: Direction,
    prices: (f64, f64, f64, Option<f64>),
    status: TradeStatus,
) -> TradeRecord {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let (entry, stop, target, exit) = prices;

    TradeRecord {
        id: 0,
        date,
        day: TradingDay::from_weekday(date.weekday()).unwrap(),
        session,
        direction,
        status,
        instrument_name: "NQ".to_string(),
        entry_method_name: "Limit at FVG".to_string(),
        confirmation_type: ConfirmationType::Close,
        account_name: "Eval 50k".to_string(),
        confirmation_time: time.to_string(),
        entry_time: time.to_string(),
        entry: Some(entry),
        stop: Some(stop),
        target: Some(target),
        exit,
        scores: ScoreCard::new(8, 7, 6, 7, 8, 9),
        confluences: vec!["FVG".to_string()],
        notes: String::new(),
        stop_ticks: 0.0,
        pot_result: 0.0,
        result: None,
        average: None,
    }
}

/// NQ trades over Jan/Feb 2024 in chronological order: win, win, loss,
/// win, win, win, then one open short.
pub fn sample_trades() -> Vec<TradeRecord> {
    use Direction::*;
    use Session::*;
    use TradeStatus::*;

    vec![
        raw_trade("2024-01-15", Odr, "04:35", Long, (100.0, 98.0, 106.0, Some(104.0)), Winner),
        raw_trade("2024-01-15", Rdr, "10:50", Long, (100.0, 98.0, 104.0, Some(102.0)), Winner),
        raw_trade("2024-01-16", Odr, "05:10", Long, (100.0, 98.0, 106.0, Some(98.0)), Expense),
        raw_trade("2024-01-17", Rdr, "13:20", Long, (100.0, 97.5, 110.0, Some(105.0)), Winner),
        raw_trade("2024-02-01", Odr, "04:05", Long, (100.0, 99.0, 103.0, Some(103.0)), Winner),
        raw_trade("2024-02-02", Rdr, "15:40", Long, (100.0, 96.0, 108.0, Some(104.0)), Winner),
        raw_trade("2024-02-02", Rdr, "15:50", Short, (100.0, 102.0, 96.0, None), Unset),
    ]
}
