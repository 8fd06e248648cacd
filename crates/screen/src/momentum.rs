//! Сдвиг средней дневной доходности: последние `lookback` баров против
//! предыдущих `lookback`, плюс изменение close за весь период.

use market::Bar;

pub const DEFAULT_LOOKBACK: usize = 7;

/// Средняя доходность close-to-close внутри окна.
/// Первый бар окна доходности не имеет (нет предыдущего close внутри окна).
pub fn average_return(candles: &[Bar]) -> Option<f64> {
    let returns: Vec<f64> = candles
        .windows(2)
        .map(|w| w[1].close.0 / w[0].close.0 - 1.0)
        .filter(|r| r.is_finite())
        .collect();

    if returns.is_empty() {
        return None;
    }

    Some(returns.iter().sum::<f64>() / returns.len() as f64)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MomentumShift {
    pub earlier: f64,
    pub latest: f64,
    /// (latest - earlier) / |earlier| * 100, либо 0 при earlier == 0
    pub change_pct: f64,
}

pub fn momentum_shift(candles: &[Bar], lookback: usize) -> Option<MomentumShift> {
    let n = candles.len();
    let span = lookback.checked_mul(2)?;
    if lookback < 2 || n < span {
        return None;
    }

    let earlier = average_return(&candles[n - span..n - lookback])?;
    let latest = average_return(&candles[n - lookback..])?;

    let change_pct = if earlier != 0.0 {
        (latest - earlier) / earlier.abs() * 100.0
    } else {
        0.0
    };

    Some(MomentumShift {
        earlier,
        latest,
        change_pct,
    })
}

/// Изменение close за весь ряд в процентах: (last - first) / first * 100
pub fn period_change_pct(candles: &[Bar]) -> Option<f64> {
    let (first, last) = (candles.first()?, candles.last()?);
    let change = (last.close.0 - first.close.0) / first.close.0 * 100.0;

    change.is_finite().then_some(change)
}
