use market::Bar;

/// Диапазон бара в процентах от low
pub fn range_pct(candle: &Bar) -> f64 {
    (candle.high.0 - candle.low.0) / candle.low.0 * 100.0
}

/// Простое среднее range_pct, без EMA
pub fn average_range_pct(candles: &[Bar]) -> Option<f64> {
    if candles.is_empty() {
        return None;
    }

    let sum: f64 = candles.iter().map(range_pct).sum();
    Some(sum / candles.len() as f64)
}

/// Каждый бар: higher high + higher low, либо lower high + lower low
pub fn is_monotonic_trend(candles: &[Bar]) -> bool {
    let pairs = || candles.windows(2).map(|w| (&w[0], &w[1]));

    let rising = pairs().all(|(a, b)| b.high.0 > a.high.0 && b.low.0 > a.low.0);
    let falling = pairs().all(|(a, b)| b.high.0 < a.high.0 && b.low.0 < a.low.0);

    rising || falling
}

/// Пороги волатильности (в процентах)
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VolatilityParams {
    pub trending_min_pct: f64,
    pub ranging_min_pct: f64,
}

impl Default for VolatilityParams {
    fn default() -> Self {
        Self {
            trending_min_pct: 1.0,
            ranging_min_pct: 2.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VolatilityReport {
    pub average_pct: f64,
    pub trending: bool,
    pub passed: bool,
}

/// Трендовому ряду хватает меньшей волатильности
pub fn volatility_screen(candles: &[Bar], params: VolatilityParams) -> Option<VolatilityReport> {
    let average_pct = average_range_pct(candles)?;
    let trending = is_monotonic_trend(candles);

    let threshold = if trending {
        params.trending_min_pct
    } else {
        params.ranging_min_pct
    };

    Some(VolatilityReport {
        average_pct,
        trending,
        passed: average_pct >= threshold,
    })
}
