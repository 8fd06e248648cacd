use market::Bar;

use crate::candle::Direction;

/// Fair value gap: диапазоны первого и третьего бара не пересекаются
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Gap {
    pub start: usize,
    pub end: usize,
    pub direction: Direction,
}

/// Проверка тройки баров с центром в `i`.
/// Обе проверки независимы: на невалидном OHLC возможны оба гэпа.
pub fn gaps_at(bars: &[Bar], i: usize) -> impl Iterator<Item = Gap> {
    let triple = (i >= 1 && i + 1 < bars.len()).then(|| (&bars[i - 1], &bars[i + 1]));

    let bullish = triple
        .filter(|(first, third)| first.high.0 < third.low.0)
        .map(|_| Gap {
            start: i - 1,
            end: i + 1,
            direction: Direction::Bullish,
        });

    let bearish = triple
        .filter(|(first, third)| first.low.0 > third.high.0)
        .map(|_| Gap {
            start: i - 1,
            end: i + 1,
            direction: Direction::Bearish,
        });

    bullish.into_iter().chain(bearish)
}

/// Все гэпы ряда в порядке позиций
pub fn detect_gaps(bars: &[Bar]) -> Vec<Gap> {
    if bars.len() < 3 {
        return Vec::new();
    }

    (1..bars.len() - 1).flat_map(|i| gaps_at(bars, i)).collect()
}
