//! Core domain types.
//!
//! Цель:
//! - запретить "голые" f64 в модели данных
//! - отделить цену от объёма и от времени
//! - сделать позицию бара и его timestamp разными сущностями

use std::fmt;

/// Цена инструмента
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Price(pub f64);

/// Объём за бар
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Qty(pub f64);

/// Доля / коэффициент (0.05 = 5%)
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ratio(pub f64);

/// Время в миллисекундах (unix epoch)
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimestampMs(pub i64);

//
// --- Conversions & helpers --------------------------------------------------
//

impl Price {
    /// Цена, сдвинутая на долю: `p * (1 + r)`
    pub fn scaled(self, r: Ratio) -> Price {
        Price(self.0 * (1.0 + r.0))
    }

    pub fn distance(self, other: Price) -> f64 {
        (self.0 - other.0).abs()
    }
}

impl Qty {
    pub fn is_missing(self) -> bool {
        self.0.is_nan()
    }
}

//
// --- Display ----------------------------------------------------------------
//

impl fmt::Display for TimestampMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
