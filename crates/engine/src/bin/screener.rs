use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use engine::config::AnalysisArgs;
use engine::load::{CacheKey, parse_date, read_series};
use engine::sink::TracingSink;

use market::types::Ratio;
use screen::momentum::{momentum_shift, period_change_pct};
use screen::rank::rank_descending;
use screen::split_screen::{SplitPosition, SplitScreenReason, split_position, split_screen};
use screen::volatility::{VolatilityParams, volatility_screen};
use screen::zone_screen::{ZoneScreenParams, zone_screen};
use structure::analyze;

#[derive(Parser, Debug)]
#[command(name = "screener", about = "Screen cached series for zone setups")]
struct Args {
    /// Список тикеров: по одному в строке (первая колонка CSV тоже подойдёт)
    #[arg(long)]
    tickers: String,
    #[arg(long, default_value = "data")]
    data_dir: String,
    #[arg(long, default_value = "1d")]
    interval: String,
    #[arg(long)]
    start: String,
    #[arg(long)]
    end: String,

    #[command(flatten)]
    analysis: AnalysisArgs,

    #[arg(long, default_value_t = 0.05)]
    demand_tolerance: f64,
    #[arg(long, default_value_t = 0.05)]
    supply_clearance: f64,
    #[arg(long, default_value_t = 1.0)]
    trending_min_pct: f64,
    #[arg(long, default_value_t = 2.0)]
    ranging_min_pct: f64,
    /// Последние N баров для волатильности
    #[arg(long, default_value_t = 7)]
    volatility_bars: usize,
    /// Окно сравнения средней доходности
    #[arg(long, default_value_t = screen::momentum::DEFAULT_LOOKBACK)]
    lookback: usize,

    /// Оставлять только close в нижних двух третях между зонами
    #[arg(long, default_value_t = false)]
    split_screen: bool,

    #[arg(long, value_enum, default_value_t = RankBy::Momentum)]
    rank_by: RankBy,

    #[arg(long, default_value = "data/screen_tips.csv")]
    out: String,
}

/// Критерий сортировки результата (по убыванию)
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum RankBy {
    Momentum,
    Volatility,
    Performance,
}

impl RankBy {
    fn key(self, tip: &TipRow) -> f64 {
        match self {
            RankBy::Momentum => tip.momentum_change_pct,
            RankBy::Volatility => tip.average_volatility_pct,
            RankBy::Performance => tip.period_change_pct,
        }
    }
}

fn split_label(p: SplitPosition) -> &'static str {
    match p {
        SplitPosition::Lower => "lower",
        SplitPosition::Middle => "middle",
        SplitPosition::Upper => "upper",
    }
}

#[derive(Debug, serde::Serialize)]
struct TipRow {
    ticker: String,
    last_close: f64,
    momentum_change_pct: f64,
    period_change_pct: f64,
    average_volatility_pct: f64,
    trending: bool,
    demand_low: f64,
    demand_high: f64,
    supply_low: f64,
    supply_high: f64,
    split_low: f64,
    split_high: f64,
    split_position: &'static str,
}

struct Window {
    start: NaiveDate,
    end: NaiveDate,
}

fn read_tickers(path: &str) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read tickers {}", path))?;
    Ok(parse_tickers(&text))
}

fn parse_tickers(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|l| l.split(',').next())
        .map(str::trim)
        .filter(|t| !t.is_empty() && !t.starts_with('#') && !t.eq_ignore_ascii_case("ticker"))
        .map(str::to_string)
        .collect()
}

fn screen_one(args: &Args, window: &Window, ticker: &str) -> Result<Option<TipRow>> {
    let key = CacheKey {
        symbol: ticker.to_string(),
        start: window.start,
        end: window.end,
        interval: args.interval.clone(),
    };
    let series = read_series(key.path_in(&args.data_dir), ticker)?;

    let Some(last) = series.last().copied() else {
        warn!(ticker, "empty series");
        return Ok(None);
    };

    // 1) средняя доходность растёт
    let Some(shift) = momentum_shift(series.bars(), args.lookback) else {
        warn!(ticker, bars = series.len(), "not enough bars for momentum");
        return Ok(None);
    };
    if shift.change_pct <= 0.0 {
        info!(ticker, change_pct = shift.change_pct, "momentum not improving");
        return Ok(None);
    }

    // 2) достаточно волатилен
    let bars = series.bars();
    let recent = &bars[bars.len().saturating_sub(args.volatility_bars)..];
    let vol_params = VolatilityParams {
        trending_min_pct: args.trending_min_pct,
        ranging_min_pct: args.ranging_min_pct,
    };
    let Some(vol) = volatility_screen(recent, vol_params) else {
        warn!(ticker, "no bars for volatility");
        return Ok(None);
    };
    if !vol.passed {
        info!(ticker, average_pct = vol.average_pct, trending = vol.trending, "volatility too low");
        return Ok(None);
    }

    // 3) цена между зонами
    let mut sink = TracingSink::new(ticker);
    let a = analyze(&series, args.analysis.params(), args.analysis.rules.rules(), &mut sink);

    let zone_params = ZoneScreenParams {
        demand_tolerance: Ratio(args.demand_tolerance),
        supply_clearance: Ratio(args.supply_clearance),
    };
    let decision = zone_screen(&last, &a.closest, zone_params);
    if !decision.passed() {
        info!(ticker, reason = ?decision.reason, "zone screen failed");
        return Ok(None);
    }

    // 4) опционально: close не в верхней трети
    if args.split_screen {
        let reason = split_screen(last.close, a.split_lines);
        if reason != SplitScreenReason::Passed {
            info!(ticker, ?reason, "split screen failed");
            return Ok(None);
        }
    }

    let (Some(demand), Some(supply), Some(lines)) = (a.closest.demand, a.closest.supply, a.split_lines)
    else {
        return Ok(None);
    };
    let (split_low, split_high) = lines;

    info!(ticker, close = last.close.0, "setup found");

    Ok(Some(TipRow {
        ticker: ticker.to_string(),
        last_close: last.close.0,
        momentum_change_pct: shift.change_pct,
        period_change_pct: period_change_pct(bars).unwrap_or(f64::NAN),
        average_volatility_pct: vol.average_pct,
        trending: vol.trending,
        demand_low: demand.low.0,
        demand_high: demand.high.0,
        supply_low: supply.low.0,
        supply_high: supply.high.0,
        split_low: split_low.0,
        split_high: split_high.0,
        split_position: split_label(split_position(last.close, lines)),
    }))
}

fn write_tips(path: &str, tips: &[TipRow]) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::Writer::from_path(path).with_context(|| format!("create {}", path))?;
    for t in tips {
        wtr.serialize(t)?;
    }
    wtr.flush()?;

    Ok(())
}

fn main() -> Result<()> {
    engine::init_tracing("engine=info,screener=info");

    let args = Args::parse();
    let window = Window {
        start: parse_date(&args.start)?,
        end: parse_date(&args.end)?,
    };

    let tickers = read_tickers(&args.tickers)?;
    info!(count = tickers.len(), "tickers loaded");

    let mut tips = Vec::new();
    for ticker in &tickers {
        match screen_one(&args, &window, ticker) {
            Ok(Some(tip)) => tips.push(tip),
            Ok(None) => {}
            Err(e) => error!(ticker = %ticker, "screen failed: {:#}", e),
        }
    }

    let rank_by = args.rank_by;
    rank_descending(&mut tips, |t| rank_by.key(t));

    write_tips(&args.out, &tips)?;
    info!(passed = tips.len(), total = tickers.len(), out = %args.out, "done");

    Ok(())
}
