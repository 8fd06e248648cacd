//! JSON-отчёт по одному ряду. Каждая позиция дополнена временем бара.

use chrono::DateTime;
use serde::Serialize;

use market::types::TimestampMs;
use market::{BarSeries, MarketError};

use structure::Analysis;
use structure::candle::Direction;
use structure::pivot::PivotKind;
use structure::trend::Trend;
use structure::zone::{Zone, ZoneKind};

/// Позиция бара и его время
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mark {
    pub pos: usize,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapRow {
    pub start: Mark,
    pub end: Mark,
    pub direction: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub at: Mark,
    pub kind: &'static str,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakRow {
    pub at: Mark,
    pub pivot: Mark,
    pub direction: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneRow {
    pub kind: &'static str,
    pub anchor: Mark,
    pub pivot: Mark,
    pub low: f64,
    pub high: f64,
}

/// Подряд идущие бары с одной меткой тренда
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSegment {
    pub from: Mark,
    pub to: Mark,
    pub trend: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub bars: usize,
    pub last_close: Option<f64>,
    pub gaps: Vec<GapRow>,
    pub pivots: Vec<PivotRow>,
    pub breaks: Vec<BreakRow>,
    pub demand: Vec<ZoneRow>,
    pub supply: Vec<ZoneRow>,
    pub trend: Vec<TrendSegment>,
    pub closest_demand: Option<ZoneRow>,
    pub closest_supply: Option<ZoneRow>,
    pub split_lines: Option<[f64; 2]>,
}

/// RFC 3339 (UTC), вне диапазона chrono: сырые миллисекунды
pub fn format_ts(ts: TimestampMs) -> String {
    DateTime::from_timestamp_millis(ts.0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ts.0.to_string())
}

fn direction_label(d: Direction) -> &'static str {
    match d {
        Direction::Bullish => "bullish",
        Direction::Bearish => "bearish",
    }
}

fn trend_label(t: Trend) -> &'static str {
    match t {
        Trend::Up => "up",
        Trend::Down => "down",
        Trend::Side => "side",
    }
}

fn zone_label(k: ZoneKind) -> &'static str {
    match k {
        ZoneKind::Demand => "demand",
        ZoneKind::Supply => "supply",
    }
}

impl AnalysisReport {
    pub fn build(series: &BarSeries, a: &Analysis) -> Result<Self, MarketError> {
        let mark = |pos: usize| -> Result<Mark, MarketError> {
            Ok(Mark {
                pos,
                time: format_ts(series.timestamp_of(pos)?),
            })
        };

        let zone_row = |z: &Zone| -> Result<ZoneRow, MarketError> {
            Ok(ZoneRow {
                kind: zone_label(z.kind),
                anchor: mark(z.anchor)?,
                pivot: mark(z.pivot)?,
                low: z.low.0,
                high: z.high.0,
            })
        };

        let gaps = a
            .gaps
            .iter()
            .map(|g| -> Result<GapRow, MarketError> {
                Ok(GapRow {
                    start: mark(g.start)?,
                    end: mark(g.end)?,
                    direction: direction_label(g.direction),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let candles = series.bars();
        let pivots = a
            .pivots
            .merged()
            .into_iter()
            .map(|(pos, kind)| -> Result<PivotRow, MarketError> {
                let at = mark(pos)?;
                let (kind, price) = match kind {
                    PivotKind::High => ("high", candles[pos].high.0),
                    PivotKind::Low => ("low", candles[pos].low.0),
                };
                Ok(PivotRow { at, kind, price })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let breaks = a
            .breaks
            .iter()
            .map(|b| -> Result<BreakRow, MarketError> {
                Ok(BreakRow {
                    at: mark(b.pos)?,
                    pivot: mark(b.pivot)?,
                    direction: direction_label(b.direction),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let demand = a.demand.iter().map(zone_row).collect::<Result<Vec<_>, _>>()?;
        let supply = a.supply.iter().map(zone_row).collect::<Result<Vec<_>, _>>()?;

        let mut trend = Vec::new();
        for (start, end, t) in trend_runs(&a.trend) {
            trend.push(TrendSegment {
                from: mark(start)?,
                to: mark(end)?,
                trend: trend_label(t),
            });
        }

        Ok(Self {
            symbol: series.symbol().to_string(),
            bars: series.len(),
            last_close: series.last().map(|b| b.close.0),
            gaps,
            pivots,
            breaks,
            demand,
            supply,
            trend,
            closest_demand: a.closest.demand.as_ref().map(zone_row).transpose()?,
            closest_supply: a.closest.supply.as_ref().map(zone_row).transpose()?,
            split_lines: a.split_lines.map(|(lo, hi)| [lo.0, hi.0]),
        })
    }
}

/// Сжатие меток в отрезки [start, end] включительно
fn trend_runs(trend: &[Trend]) -> Vec<(usize, usize, Trend)> {
    let mut runs: Vec<(usize, usize, Trend)> = Vec::new();

    for (i, &t) in trend.iter().enumerate() {
        match runs.last_mut() {
            Some((_, end, last)) if *last == t => *end = i,
            _ => runs.push((i, i, t)),
        }
    }

    runs
}
