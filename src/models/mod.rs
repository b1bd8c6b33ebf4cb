pub mod direction;
pub mod trade;

pub use direction::*;
pub use trade::{parse_clock, Instrument, ScoreCard, TradeRecord, BREAK_EVEN_THRESHOLD};
