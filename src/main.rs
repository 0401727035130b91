use std::{env, io, path::PathBuf};

use kpis::{domain::kpi, error::Result, ledger, report};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LEDGER_PATH: &str = "data/monthly_financials.csv";

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kpis=info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH));

    info!("loading ledger from {}", path.display());
    let records = ledger::load(&path)?;
    let kpis = kpi::compute(&records);
    info!(months = kpis.len(), "computed KPI table");

    let mut stdout = io::stdout().lock();
    report::write_summary(&mut stdout, &kpis)?;
    report::write_table(&mut stdout, &kpis)?;

    Ok(())
}
