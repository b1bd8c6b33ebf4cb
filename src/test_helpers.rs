use chrono::{Datelike, NaiveDate};

use crate::models::{
    ConfirmationType, Direction, ScoreCard, Session, TradeRecord, TradeStatus, TradingDay,
};

/// An ODR long NQ trade on a weekday `date`, confirmed and entered at
/// `confirmation_time`, with `result` already derived.
pub fn make_trade(date: &str, confirmation_time: &str, result: Option<f64>) -> TradeRecord {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let day = TradingDay::from_weekday(date.weekday()).expect("weekday date");

    TradeRecord {
        id: 0,
        date,
        day,
        session: Session::Odr,
        direction: Direction::Long,
        status: TradeStatus::Unset,
        instrument_name: "NQ".to_string(),
        entry_method_name: "Limit at FVG".to_string(),
        confirmation_type: ConfirmationType::Wick,
        account_name: "Eval 50k".to_string(),
        confirmation_time: confirmation_time.to_string(),
        entry_time: confirmation_time.to_string(),
        entry: Some(17950.0),
        stop: Some(17940.0),
        target: Some(17980.0),
        exit: None,
        scores: ScoreCard::default(),
        confluences: Vec::new(),
        notes: String::new(),
        stop_ticks: 0.0,
        pot_result: 0.0,
        result,
        average: None,
    }
}

/// A Monday 04:10 trade with the given outcome.
pub fn make_trade_with(status: TradeStatus, result: Option<f64>) -> TradeRecord {
    let mut t = make_trade("2024-01-15", "04:10", result);
    t.status = status;
    t
}
