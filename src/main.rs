use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use trade_journal::config::{Config, ReportFormat};
use trade_journal::journal::Journal;
use trade_journal::store::{JsonTradeStore, TradeFilter};

const USAGE: &str = "usage: trade-journal <report [filter.json] | recompute>";

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("report");

    let store = JsonTradeStore::open(&cfg.data_file)
        .await
        .with_context(|| format!("opening journal {}", cfg.data_file.display()))?;
    let mut journal = Journal::new(Box::new(store));

    match command {
        "report" => {
            let filter = match args.get(2) {
                Some(path) => load_filter(path).await?,
                None => TradeFilter::all(),
            };
            let report = journal.report(filter).await?;
            match cfg.report_format {
                ReportFormat::Text => report.print_summary(),
                ReportFormat::Json => println!("{}", report.to_json()?),
            }
        }
        "recompute" => {
            let updated = journal.recompute_all().await?;
            println!("Updated {} trades", updated);
        }
        other => bail!("unknown command {:?}\n{}", other, USAGE),
    }

    Ok(())
}

async fn load_filter(path: &str) -> Result<TradeFilter> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading filter {}", path))?;
    let filter = serde_json::from_str(&content)
        .with_context(|| format!("parsing filter {}", path))?;
    Ok(filter)
}
