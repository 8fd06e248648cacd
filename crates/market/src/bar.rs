use crate::types::{Price, Qty, TimestampMs};

/// Один OHLCV бар
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bar {
    pub ts: TimestampMs,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Qty,
}

impl Bar {
    pub fn new(ts: TimestampMs, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            ts,
            open: Price(open),
            high: Price(high),
            low: Price(low),
            close: Price(close),
            volume: Qty(volume),
        }
    }

    /// |open - close|
    pub fn body(&self) -> f64 {
        (self.open.0 - self.close.0).abs()
    }

    /// high - low (без abs: OHLC не валидируется)
    pub fn range(&self) -> f64 {
        self.high.0 - self.low.0
    }

    pub fn lower_shadow(&self) -> f64 {
        self.open.0.min(self.close.0) - self.low.0
    }

    pub fn upper_shadow(&self) -> f64 {
        self.high.0 - self.open.0.max(self.close.0)
    }

    pub fn is_bullish(&self) -> bool {
        self.close.0 > self.open.0
    }
}
