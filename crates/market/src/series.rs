//! Упорядоченный ряд баров одного инструмента.
//!
//! Все детекторы адресуют бары по позиции в ряду. Timestamp нужен только
//! на границе (загрузка, отчёт), поэтому доступ разделён явно:
//! `by_position` и `by_timestamp`.

use crate::bar::Bar;
use crate::error::MarketError;
use crate::types::TimestampMs;

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Бары ожидаются по возрастанию времени, без дублей (не проверяется).
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn by_position(&self, pos: usize) -> Option<&Bar> {
        self.bars.get(pos)
    }

    pub fn by_timestamp(&self, ts: TimestampMs) -> Option<&Bar> {
        self.position_of(ts).ok().map(|pos| &self.bars[pos])
    }

    /// Позиция бара с данным timestamp (бинарный поиск по возрастающему ряду).
    pub fn position_of(&self, ts: TimestampMs) -> Result<usize, MarketError> {
        self.bars
            .binary_search_by_key(&ts, |b| b.ts)
            .map_err(|_| MarketError::UnknownTimestamp(ts))
    }

    pub fn timestamp_of(&self, pos: usize) -> Result<TimestampMs, MarketError> {
        self.bars
            .get(pos)
            .map(|b| b.ts)
            .ok_or(MarketError::PositionOutOfRange {
                pos,
                len: self.bars.len(),
            })
    }

    /// Средний размер тела, NaN-значения пропускаются
    pub fn average_body(&self) -> Option<f64> {
        mean(self.bars.iter().map(Bar::body))
    }

    /// Средний объём, пропущенные объёмы (NaN) не учитываются
    pub fn average_volume(&self) -> Option<f64> {
        mean(self.bars.iter().map(|b| b.volume.0))
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));

    if count == 0 {
        return None;
    }

    Some(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(ts: i64, open: f64, close: f64, volume: f64) -> Bar {
        Bar::new(
            TimestampMs(ts),
            open,
            open.max(close) + 1.0,
            open.min(close) - 1.0,
            close,
            volume,
        )
    }

    fn series() -> BarSeries {
        BarSeries::new(
            "TEST",
            vec![
                bar(1_000, 10.0, 12.0, 100.0),
                bar(2_000, 12.0, 11.0, f64::NAN),
                bar(3_000, 11.0, 14.0, 300.0),
            ],
        )
    }

    #[test]
    fn accessors_by_position_and_timestamp_agree() {
        let s = series();

        assert_eq!(s.position_of(TimestampMs(2_000)), Ok(1));
        assert_eq!(s.timestamp_of(1), Ok(TimestampMs(2_000)));
        // у бара 1 объём NaN, поэтому сравниваем по ts
        assert_eq!(
            s.by_position(1).map(|b| b.ts),
            s.by_timestamp(TimestampMs(2_000)).map(|b| b.ts)
        );
        assert_eq!(s.by_position(2), s.by_timestamp(TimestampMs(3_000)));
    }

    #[test]
    fn unknown_timestamp_and_position_are_errors() {
        let s = series();

        assert_eq!(
            s.position_of(TimestampMs(1_500)),
            Err(MarketError::UnknownTimestamp(TimestampMs(1_500)))
        );
        assert_eq!(
            s.timestamp_of(3),
            Err(MarketError::PositionOutOfRange { pos: 3, len: 3 })
        );
        assert!(s.by_position(3).is_none());
    }

    #[test]
    fn averages_skip_missing_values() {
        let s = series();

        // тела: 2, 1, 3
        assert_eq!(s.average_body(), Some(2.0));
        // объёмы: 100, NaN, 300
        assert_eq!(s.average_volume(), Some(200.0));
    }

    #[test]
    fn averages_of_empty_series_are_none() {
        let s = BarSeries::new("EMPTY", Vec::new());
        assert!(s.is_empty());
        assert_eq!(s.average_body(), None);
        assert_eq!(s.average_volume(), None);
    }
}
