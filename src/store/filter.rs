use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ConfirmationType, Direction, Session, TradeRecord, TradeStatus, TradingDay};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfluenceLogic {
    /// Every listed tag must be present.
    #[default]
    And,
    /// At least one listed tag must be present.
    Or,
}

/// Query predicate for trade stores. Unset criteria match everything;
/// ranges are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub session: Option<Session>,
    pub instrument: Option<String>,
    pub entry_method: Option<String>,
    pub account: Option<String>,
    pub confirmation_type: Option<ConfirmationType>,
    pub direction: Option<Direction>,
    pub status: Option<TradeStatus>,
    pub days: Vec<TradingDay>,
    pub stop_ticks_min: Option<f64>,
    pub stop_ticks_max: Option<f64>,
    pub average_min: Option<f64>,
    pub average_max: Option<f64>,
    pub confluences: Vec<String>,
    pub confluence_logic: ConfluenceLogic,
}

impl TradeFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, t: &TradeRecord) -> bool {
        if self.date_from.is_some_and(|from| t.date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| t.date > to) {
            return false;
        }
        if self.session.is_some_and(|s| t.session != s) {
            return false;
        }
        if !label_matches(&self.instrument, &t.instrument_name)
            || !label_matches(&self.entry_method, &t.entry_method_name)
            || !label_matches(&self.account, &t.account_name)
        {
            return false;
        }
        if self.confirmation_type.is_some_and(|c| t.confirmation_type != c) {
            return false;
        }
        if self.direction.is_some_and(|d| t.direction != d) {
            return false;
        }
        if self.status.is_some_and(|s| t.status != s) {
            return false;
        }
        if !self.days.is_empty() && !self.days.contains(&t.day) {
            return false;
        }
        if !in_range(Some(t.stop_ticks), self.stop_ticks_min, self.stop_ticks_max) {
            return false;
        }
        if !in_range(t.average, self.average_min, self.average_max) {
            return false;
        }
        self.confluences_match(t)
    }

    fn confluences_match(&self, t: &TradeRecord) -> bool {
        if self.confluences.is_empty() {
            return true;
        }
        let has = |tag: &String| t.confluences.iter().any(|c| c.eq_ignore_ascii_case(tag));
        match self.confluence_logic {
            ConfluenceLogic::And => self.confluences.iter().all(has),
            ConfluenceLogic::Or => self.confluences.iter().any(has),
        }
    }
}

fn label_matches(wanted: &Option<String>, actual: &str) -> bool {
    wanted
        .as_deref()
        .map_or(true, |w| w.trim().eq_ignore_ascii_case(actual.trim()))
}

/// A missing value only passes when the range is unbounded.
fn in_range(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(v) = value else {
        return false;
    };
    min.map_or(true, |m| v >= m) && max.map_or(true, |m| v <= m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_trade;

    fn tagged(tags: &[&str]) -> TradeRecord {
        let mut t = make_trade("2024-01-15", "04:10", Some(1.0));
        t.confluences = tags.iter().map(|s| s.to_string()).collect();
        t
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(TradeFilter::all().matches(&make_trade("2024-01-15", "04:10", None)));
    }

    #[test]
    fn date_range_is_inclusive() {
        let f = TradeFilter {
            date_from: NaiveDate::from_ymd_opt(2024, 1, 15),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..Default::default()
        };
        assert!(f.matches(&make_trade("2024-01-15", "04:10", None)));
        assert!(f.matches(&make_trade("2024-01-31", "04:10", None)));
        assert!(!f.matches(&make_trade("2024-02-01", "04:10", None)));
        assert!(!f.matches(&make_trade("2024-01-12", "04:10", None)));
    }

    #[test]
    fn labels_match_case_insensitively() {
        let f = TradeFilter {
            instrument: Some("nq".into()),
            ..Default::default()
        };
        let mut t = make_trade("2024-01-15", "04:10", None);
        t.instrument_name = "NQ".into();
        assert!(f.matches(&t));
        t.instrument_name = "ES".into();
        assert!(!f.matches(&t));
    }

    #[test]
    fn day_set() {
        let f = TradeFilter {
            days: vec![TradingDay::Tue, TradingDay::Wed],
            ..Default::default()
        };
        assert!(!f.matches(&make_trade("2024-01-15", "04:10", None)));
        assert!(f.matches(&make_trade("2024-01-16", "04:10", None)));
    }

    #[test]
    fn average_range_excludes_unscored_trades() {
        let f = TradeFilter {
            average_min: Some(7.0),
            ..Default::default()
        };
        let mut t = make_trade("2024-01-15", "04:10", None);
        assert!(!f.matches(&t));
        t.average = Some(7.0);
        assert!(f.matches(&t));
        t.average = Some(6.9);
        assert!(!f.matches(&t));
    }

    #[test]
    fn stop_tick_range() {
        let f = TradeFilter {
            stop_ticks_min: Some(5.0),
            stop_ticks_max: Some(20.0),
            ..Default::default()
        };
        let mut t = make_trade("2024-01-15", "04:10", None);
        t.stop_ticks = 20.0;
        assert!(f.matches(&t));
        t.stop_ticks = 21.0;
        assert!(!f.matches(&t));
    }

    #[test]
    fn confluence_and_or() {
        let mut f = TradeFilter {
            confluences: vec!["FVG".into(), "Liquidity Sweep".into()],
            ..Default::default()
        };
        assert!(f.matches(&tagged(&["fvg", "Liquidity Sweep", "SMT"])));
        assert!(!f.matches(&tagged(&["FVG"])));

        f.confluence_logic = ConfluenceLogic::Or;
        assert!(f.matches(&tagged(&["FVG"])));
        assert!(!f.matches(&tagged(&["SMT"])));
        assert!(!f.matches(&tagged(&[])));
    }

    #[test]
    fn deserializes_partial_filter() {
        let f: TradeFilter = serde_json::from_str(
            r#"{"session": "ODR", "direction": "Long", "confluence_logic": "or"}"#,
        )
        .unwrap();
        assert_eq!(f.session, Some(Session::Odr));
        assert_eq!(f.direction, Some(Direction::Long));
        assert_eq!(f.confluence_logic, ConfluenceLogic::Or);
        assert!(f.days.is_empty());
    }
}
