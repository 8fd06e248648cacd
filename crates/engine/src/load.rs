//! Чтение закэшированных CSV с барами.
//!
//! Кэш наполняет внешний загрузчик, здесь только чтение. Поддерживаются
//! заголовки `ts,open,...` и выгрузки вида `Date,Open,High,Low,Close,Volume`.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use market::types::TimestampMs;
use market::{Bar, BarSeries};

#[derive(serde::Deserialize)]
struct CandleRow {
    #[serde(alias = "Date", alias = "Datetime", alias = "timestamp")]
    ts: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume", default)]
    volume: Option<f64>,
}

/// Ключ файла кэша: `{symbol}_data_{start}_{end}_{interval}.csv`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub interval: String,
}

impl CacheKey {
    pub fn file_name(&self) -> String {
        format!(
            "{}_data_{}_{}_{}.csv",
            self.symbol,
            self.start.format("%Y%m%d"),
            self.end.format("%Y%m%d"),
            self.interval
        )
    }

    pub fn path_in(&self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(self.file_name())
    }
}

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").with_context(|| format!("bad date: {}", date))
}

/// Epoch ms, RFC 3339, `%Y-%m-%d %H:%M:%S[%:z]` или `%Y-%m-%d` (UTC)
pub fn parse_ts(raw: &str) -> Result<TimestampMs> {
    let raw = raw.trim();

    if let Ok(ms) = raw.parse::<i64>() {
        return Ok(TimestampMs(ms));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(TimestampMs(dt.timestamp_millis()));
    }

    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(TimestampMs(dt.timestamp_millis()));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(TimestampMs(Utc.from_utc_datetime(&dt).timestamp_millis()));
    }

    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let dt = d
            .and_hms_opt(0, 0, 0)
            .with_context(|| format!("bad date: {}", raw))?;
        return Ok(TimestampMs(Utc.from_utc_datetime(&dt).timestamp_millis()));
    }

    bail!("unsupported timestamp: {}", raw)
}

pub fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut out = Vec::new();

    for (line, r) in rdr.deserialize::<CandleRow>().enumerate() {
        let row = r.with_context(|| format!("bad row {}", line + 1))?;
        out.push(Bar::new(
            parse_ts(&row.ts)?,
            row.open,
            row.high,
            row.low,
            row.close,
            // пропуск объёма не учитывается в средних
            row.volume.unwrap_or(f64::NAN),
        ));
    }

    Ok(out)
}

pub fn read_series(path: impl AsRef<Path>, symbol: &str) -> Result<BarSeries> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    let bars = read_bars(file).with_context(|| format!("read {}", path.display()))?;

    Ok(BarSeries::new(symbol, bars))
}
