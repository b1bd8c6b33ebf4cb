use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::errors::JournalResult;
use crate::models::TradeRecord;
use crate::store::TradeFilter;
use crate::trading::{aggregate_all, AggregationBucket, Dimension, PerformanceSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionReport {
    pub dimension: Dimension,
    pub buckets: Vec<AggregationBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub generated_at: DateTime<Utc>,
    pub filter: TradeFilter,
    pub summary: PerformanceSummary,
    pub dimensions: Vec<DimensionReport>,
}

impl PerformanceReport {
    pub fn build(trades: &[TradeRecord], filter: TradeFilter) -> Self {
        let dimensions = aggregate_all(trades)
            .into_iter()
            .map(|(dimension, buckets)| DimensionReport { dimension, buckets })
            .collect();

        Self {
            generated_at: Utc::now(),
            filter,
            summary: PerformanceSummary::from_trades(trades),
            dimensions,
        }
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<&[AggregationBucket]> {
        self.dimensions
            .iter()
            .find(|d| d.dimension == dimension)
            .map(|d| d.buckets.as_slice())
    }

    pub fn to_json(&self) -> JournalResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();

        let _ = writeln!(out, "\n{}", "=".repeat(70));
        let _ = writeln!(out, "  PERFORMANCE REPORT");
        let _ = writeln!(out, "{}", "=".repeat(70));
        let _ = writeln!(
            out,
            "  Generated:   {}",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "  TRADES");
        let _ = writeln!(out, "  ───────────────────────────────────");
        let _ = writeln!(out, "  Total:       {} ({} closed)", s.total_trades, s.closed_trades);
        let _ = writeln!(
            out,
            "  W / L / BE:  {} / {} / {}",
            s.winners, s.losers, s.break_even
        );
        let _ = writeln!(out, "  Win Rate:    {:.1}%", s.win_rate_percent);
        let _ = writeln!(out, "  Total R:     {:+.2}", s.total_r);
        let _ = writeln!(out, "  Avg R:       {:+.2}", s.avg_r);
        let _ = writeln!(out, "  Best / Worst: {:+.2} / {:+.2}", s.best_r, s.worst_r);
        match s.avg_score {
            Some(score) => {
                let _ = writeln!(out, "  Avg Score:   {:.1}", score);
            }
            None => {
                let _ = writeln!(out, "  Avg Score:   -");
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "  STREAKS");
        let _ = writeln!(out, "  ───────────────────────────────────");
        let _ = writeln!(
            out,
            "  Max W / L / BE:     {} / {} / {}",
            s.streaks.max_win_streak, s.streaks.max_loss_streak, s.streaks.max_break_even_streak
        );
        let _ = writeln!(
            out,
            "  Current W / L / BE: {} / {} / {}",
            s.streaks.current_win_streak,
            s.streaks.current_loss_streak,
            s.streaks.current_break_even_streak
        );

        for d in &self.dimensions {
            if d.buckets.iter().all(|b| b.trade_count == 0) {
                continue;
            }
            let _ = writeln!(out);
            let _ = writeln!(out, "  BY {}", d.dimension.as_str().replace('_', " ").to_uppercase());
            let _ = writeln!(out, "  ───────────────────────────────────");
            for b in &d.buckets {
                render_bucket(&mut out, b, 0);
            }
        }

        let _ = writeln!(out, "{}", "=".repeat(70));
        out
    }

    pub fn print_summary(&self) {
        print!("{}", self.render());
    }
}

fn render_bucket(out: &mut String, b: &AggregationBucket, depth: usize) {
    if b.trade_count == 0 && depth > 0 {
        return;
    }
    let indent = "  ".repeat(depth + 1);
    let _ = writeln!(
        out,
        "{}{:>18}: {} trades | W {} L {} BE {} | WR {:.0}% | {:+.2}R",
        indent, b.key, b.trade_count, b.winners, b.losers, b.break_even, b.win_rate_percent, b.total_r
    );
    for detail in &b.details {
        render_bucket(out, detail, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeStatus;
    use crate::test_helpers::make_trade;

    fn sample() -> Vec<TradeRecord> {
        let mut a = make_trade("2024-01-15", "04:10", Some(2.0));
        a.status = TradeStatus::Winner;
        let mut b = make_trade("2024-02-01", "04:40", Some(-1.0));
        b.status = TradeStatus::Expense;
        vec![a, b]
    }

    #[test]
    fn report_covers_every_dimension() {
        let report = PerformanceReport::build(&sample(), TradeFilter::all());
        assert_eq!(report.dimensions.len(), Dimension::ALL.len());
        assert_eq!(report.summary.total_trades, 2);

        let months = report.dimension(Dimension::Month).unwrap();
        let keys: Vec<&str> = months.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["Jan 2024", "Feb 2024"]);
    }

    #[test]
    fn render_mentions_sections() {
        let text = PerformanceReport::build(&sample(), TradeFilter::all()).render();
        assert!(text.contains("PERFORMANCE REPORT"));
        assert!(text.contains("BY STOP LOSS RANGE"));
        assert!(text.contains("Jan 2024"));
        assert!(text.contains("Win Rate:    50.0%"));
    }

    #[test]
    fn json_round_trips() {
        let report = PerformanceReport::build(&sample(), TradeFilter::all());
        let json = report.to_json().unwrap();
        let back: PerformanceReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary, report.summary);
        assert_eq!(back.dimensions.len(), report.dimensions.len());
    }
}
