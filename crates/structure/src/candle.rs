//! Классификация свечей: "boring" (тихая) и "exciting" (импульсная).
//!
//! Правила оформлены как стратегия (`CandleRules`), т.к. в разных ревизиях
//! скринеров пороги отличались. Каноническая ревизия — `RangeRules`.

use market::{Bar, BarSeries};

/// Направление свечи / гэпа / пробоя
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Bullish,
    Bearish,
}

impl Direction {
    pub fn of(bar: &Bar) -> Self {
        if bar.is_bullish() {
            Direction::Bullish
        } else {
            Direction::Bearish
        }
    }
}

/// Средние по всему ряду, считаются один раз до запуска детекторов
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CandleStats {
    pub avg_body: f64,
    pub avg_volume: f64,
}

impl CandleStats {
    /// Пустой ряд (или ряд только из пропусков) даёт нули
    pub fn from_series(series: &BarSeries) -> Self {
        Self {
            avg_body: series.average_body().unwrap_or(0.0),
            avg_volume: series.average_volume().unwrap_or(0.0),
        }
    }
}

/// Набор предикатов boring/exciting
pub trait CandleRules {
    fn is_boring(&self, bar: &Bar, stats: &CandleStats) -> bool;

    /// `Some(direction)` если свеча импульсная
    fn excitement(&self, bar: &Bar, stats: &CandleStats) -> Option<Direction>;
}

/// Тело не больше половины диапазона
fn small_body(bar: &Bar) -> bool {
    bar.body() <= 0.5 * bar.range()
}

/// Тело не меньше половины ненулевого диапазона
fn large_body(bar: &Bar) -> bool {
    bar.range() > 0.0 && bar.body() >= 0.5 * bar.range()
}

/// Каноническая ревизия: только отношение тела к диапазону
#[derive(Debug, Copy, Clone, Default)]
pub struct RangeRules;

impl CandleRules for RangeRules {
    fn is_boring(&self, bar: &Bar, _stats: &CandleStats) -> bool {
        small_body(bar)
    }

    fn excitement(&self, bar: &Bar, _stats: &CandleStats) -> Option<Direction> {
        large_body(bar).then(|| Direction::of(bar))
    }
}

/// Ранняя ревизия: дополнительно сравнивает со средним телом и объёмом
#[derive(Debug, Copy, Clone, Default)]
pub struct StrictRules;

impl CandleRules for StrictRules {
    fn is_boring(&self, bar: &Bar, stats: &CandleStats) -> bool {
        small_body(bar) && bar.body() < stats.avg_body
    }

    fn excitement(&self, bar: &Bar, stats: &CandleStats) -> Option<Direction> {
        let exciting = large_body(bar)
            && bar.volume.0 > stats.avg_volume
            && bar.body() >= 1.5 * stats.avg_body;

        exciting.then(|| Direction::of(bar))
    }
}

/// Правила + средние ряда
#[derive(Copy, Clone)]
pub struct Classifier<'a> {
    rules: &'a dyn CandleRules,
    stats: CandleStats,
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a dyn CandleRules, stats: CandleStats) -> Self {
        Self { rules, stats }
    }

    pub fn is_boring(&self, bar: &Bar) -> bool {
        self.rules.is_boring(bar, &self.stats)
    }

    pub fn excitement(&self, bar: &Bar) -> Option<Direction> {
        self.rules.excitement(bar, &self.stats)
    }

    pub fn is_exciting(&self, bar: &Bar) -> bool {
        self.excitement(bar).is_some()
    }
}
