use market::Bar;
use market::types::Price;

use crate::candle::Direction;
use crate::pivot::Pivots;

/// Break of structure: тело бара (open -> close) пересекает уровень пивота
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StructureBreak {
    pub pos: usize,
    pub pivot: usize,
    pub direction: Direction,
}

/// Open ниже уровня, close выше
fn crosses_up(candle: &Bar, level: Price) -> bool {
    candle.open.0 < level.0 && candle.close.0 > level.0
}

/// Open выше уровня, close ниже
fn crosses_down(candle: &Bar, level: Price) -> bool {
    candle.open.0 > level.0 && candle.close.0 < level.0
}

/// Для каждого бара берётся самый ранний пивот левее него,
/// который он пробивает. Бычий и медвежий поиск независимы, поэтому один
/// бар проверяется против обоих списков, а один пивот может быть пробит
/// разными барами.
pub fn detect_breaks(candles: &[Bar], pivots: &Pivots) -> Vec<StructureBreak> {
    let mut out = Vec::new();

    for (i, candle) in candles.iter().enumerate().skip(1) {
        let up = pivots
            .highs
            .iter()
            .copied()
            .filter(|&h| h < i)
            .find(|&h| crosses_up(candle, candles[h].high));

        if let Some(pivot) = up {
            out.push(StructureBreak {
                pos: i,
                pivot,
                direction: Direction::Bullish,
            });
        }

        let down = pivots
            .lows
            .iter()
            .copied()
            .filter(|&l| l < i)
            .find(|&l| crosses_down(candle, candles[l].low));

        if let Some(pivot) = down {
            out.push(StructureBreak {
                pos: i,
                pivot,
                direction: Direction::Bearish,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bar, flat_bar};

    fn pivots(highs: &[usize], lows: &[usize]) -> Pivots {
        Pivots::new(highs.to_vec(), lows.to_vec())
    }

    #[test]
    fn bullish_break_needs_open_below_and_close_above() {
        let candles = [
            bar(95.0, 100.0, 94.0, 96.0),
            bar(96.0, 99.0, 93.0, 97.0),
            bar(97.0, 103.0, 96.0, 102.0),
            bar(102.0, 106.0, 101.0, 105.0),
        ];

        let breaks = detect_breaks(&candles, &pivots(&[0], &[]));

        // бар 3 открылся выше 100 -> не пробой
        assert_eq!(
            breaks,
            vec![StructureBreak {
                pos: 2,
                pivot: 0,
                direction: Direction::Bullish
            }]
        );
    }

    #[test]
    fn bearish_break_against_pivot_low() {
        let candles = [
            bar(52.0, 53.0, 50.0, 51.0),
            bar(51.0, 54.0, 51.0, 53.0),
            bar(53.0, 54.0, 47.0, 48.0),
        ];

        let breaks = detect_breaks(&candles, &pivots(&[], &[0]));
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].pos, 2);
        assert_eq!(breaks[0].direction, Direction::Bearish);
    }

    #[test]
    fn earliest_pivot_wins() {
        let candles = [
            bar(90.0, 100.0, 89.0, 95.0),
            bar(95.0, 98.0, 90.0, 96.0),
            bar(96.0, 105.0, 95.0, 104.0),
        ];

        // бар 2 пробивает оба уровня (100 и 98), порядок ввода не важен
        let breaks = detect_breaks(&candles, &pivots(&[1, 0], &[]));
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].pivot, 0);
    }

    #[test]
    fn pivot_at_or_after_bar_is_ignored() {
        let candles = [
            bar(96.0, 105.0, 95.0, 104.0),
            bar(90.0, 100.0, 89.0, 95.0),
        ];

        assert!(detect_breaks(&candles, &pivots(&[1], &[])).is_empty());
    }

    #[test]
    fn same_pivot_broken_by_several_bars() {
        let candles = [
            bar(95.0, 100.0, 94.0, 96.0),
            bar(98.0, 102.0, 97.0, 101.0),
            bar(101.0, 101.5, 97.0, 98.0),
            bar(99.0, 103.0, 98.0, 102.0),
        ];

        let breaks = detect_breaks(&candles, &pivots(&[0], &[]));
        let positions: Vec<_> = breaks.iter().map(|b| b.pos).collect();
        assert_eq!(positions, vec![1, 3]);
        assert!(breaks.iter().all(|b| b.pivot < b.pos));
    }

    #[test]
    fn bullish_and_bearish_scans_are_independent() {
        let mut high_pivot = flat_bar(100.0);
        high_pivot.high.0 = 90.0;
        let mut low_pivot = flat_bar(100.0);
        low_pivot.low.0 = 110.0;

        // 85 < 90 < 95: пробой вверх, на low-пивот не влияет
        let candles = [high_pivot, low_pivot, bar(85.0, 120.0, 80.0, 95.0)];
        let breaks = detect_breaks(&candles, &pivots(&[0], &[1]));
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].direction, Direction::Bullish);

        // 115 > 110 > 95: пробой вниз, high-пивот не пробит (open выше уровня)
        let candles = [high_pivot, low_pivot, bar(115.0, 120.0, 80.0, 95.0)];
        let breaks = detect_breaks(&candles, &pivots(&[0], &[1]));
        assert_eq!(breaks.len(), 1);
        assert_eq!(breaks[0].direction, Direction::Bearish);
    }
}
