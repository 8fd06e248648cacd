use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use engine::config::AnalysisArgs;
use engine::load::read_series;
use engine::report::AnalysisReport;
use engine::sink::TracingSink;

use structure::analyze;

#[derive(Parser, Debug)]
#[command(name = "engine", about = "Pattern detection on one cached OHLCV series")]
struct Args {
    /// Путь к CSV с барами
    #[arg(long)]
    csv: PathBuf,

    /// Тикер (по умолчанию имя файла без расширения)
    #[arg(long)]
    symbol: Option<String>,

    #[command(flatten)]
    analysis: AnalysisArgs,

    /// Форматированный JSON
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> Result<()> {
    engine::init_tracing("engine=info");

    let args = Args::parse();

    let symbol = match &args.symbol {
        Some(s) => s.clone(),
        None => args
            .csv
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .context("cannot derive symbol from --csv, pass --symbol")?,
    };

    let series = read_series(&args.csv, &symbol)?;
    info!(symbol = %symbol, bars = series.len(), path = %args.csv.display(), "series loaded");

    let params = args.analysis.params();
    let mut sink = TracingSink::new(&symbol);
    let analysis = analyze(&series, params, args.analysis.rules.rules(), &mut sink);

    let report = AnalysisReport::build(&series, &analysis)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
