use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Long, Direction::Short];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
        }
    }
}

/// Outcome classification recorded by the trader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeStatus {
    Winner,
    Expense,
    BreakEven,
    #[default]
    Unset,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Winner => write!(f, "Winner"),
            TradeStatus::Expense => write!(f, "Expense"),
            TradeStatus::BreakEven => write!(f, "Break Even"),
            TradeStatus::Unset => write!(f, "Unset"),
        }
    }
}

/// The two intraday windows trades are taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Session {
    #[serde(rename = "ODR")]
    Odr,
    #[serde(rename = "RDR")]
    Rdr,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Session {
    pub const ALL: [Session; 2] = [Session::Odr, Session::Rdr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Odr => "ODR",
            Session::Rdr => "RDR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TradingDay {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl fmt::Display for TradingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TradingDay {
    pub const ALL: [TradingDay; 5] = [
        TradingDay::Mon,
        TradingDay::Tue,
        TradingDay::Wed,
        TradingDay::Thu,
        TradingDay::Fri,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TradingDay::Mon => "Mon",
            TradingDay::Tue => "Tue",
            TradingDay::Wed => "Wed",
            TradingDay::Thu => "Thu",
            TradingDay::Fri => "Fri",
        }
    }

    /// Weekend dates have no trading day.
    pub fn from_weekday(day: chrono::Weekday) -> Option<TradingDay> {
        match day {
            chrono::Weekday::Mon => Some(TradingDay::Mon),
            chrono::Weekday::Tue => Some(TradingDay::Tue),
            chrono::Weekday::Wed => Some(TradingDay::Wed),
            chrono::Weekday::Thu => Some(TradingDay::Thu),
            chrono::Weekday::Fri => Some(TradingDay::Fri),
            chrono::Weekday::Sat | chrono::Weekday::Sun => None,
        }
    }
}

/// How the setup was confirmed before entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfirmationType {
    #[serde(rename = "Wick Confirmation")]
    Wick,
    #[serde(rename = "Close Confirmation")]
    Close,
    #[serde(rename = "Early Indication")]
    Early,
    #[serde(rename = "No Confirmation")]
    NoConfirmation,
}

impl fmt::Display for ConfirmationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfirmationType {
    pub const ALL: [ConfirmationType; 4] = [
        ConfirmationType::Wick,
        ConfirmationType::Close,
        ConfirmationType::Early,
        ConfirmationType::NoConfirmation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationType::Wick => "Wick Confirmation",
            ConfirmationType::Close => "Close Confirmation",
            ConfirmationType::Early => "Early Indication",
            ConfirmationType::NoConfirmation => "No Confirmation",
        }
    }
}
