use market::Bar;

use crate::pivot::Pivots;

/// Режим тренда на баре
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Side,
}

/// Метка тренда для каждого бара.
///
/// Между соседними пивотами: low -> high = up, high -> low = down, иначе side.
/// После последнего пивота — сравнение close с close последнего пивота.
/// До первого пивота — side.
pub fn segment_trend(candles: &[Bar], pivots: &Pivots) -> Vec<Trend> {
    let mut trends = vec![Trend::Side; candles.len()];
    let points = pivots.merged();

    for pair in points.windows(2) {
        let ((start, _), (end, _)) = (pair[0], pair[1]);

        // бар может быть одновременно high и low, поэтому смотрим оба списка
        let trend = if pivots.is_low(start) && pivots.is_high(end) {
            Trend::Up
        } else if pivots.is_high(start) && pivots.is_low(end) {
            Trend::Down
        } else {
            Trend::Side
        };

        for t in trends.iter_mut().take(end.min(candles.len())).skip(start) {
            *t = trend;
        }
    }

    if let Some(&(last, _)) = points.last() {
        let Some(reference) = candles.get(last).map(|c| c.close.0) else {
            return trends;
        };

        for (t, c) in trends.iter_mut().zip(candles).skip(last) {
            *t = if c.close.0 > reference {
                Trend::Up
            } else if c.close.0 < reference {
                Trend::Down
            } else {
                Trend::Side
            };
        }
    }

    trends
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::flat_bar;
    use Trend::{Down, Side, Up};

    fn closes(values: &[f64]) -> Vec<Bar> {
        values.iter().copied().map(flat_bar).collect()
    }

    #[test]
    fn segments_between_pivots_and_tail_by_close() {
        let candles = closes(&[5.0, 4.0, 1.0, 3.0, 6.0, 4.0, 2.0, 2.0, 3.0, 2.0]);
        let pivots = Pivots {
            highs: vec![4],
            lows: vec![2, 6],
        };

        let t = segment_trend(&candles, &pivots);

        assert_eq!(
            t,
            vec![Side, Side, Up, Up, Down, Down, Side, Side, Up, Side]
        );
    }

    #[test]
    fn same_kind_neighbours_are_sideways() {
        let candles = closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let pivots = Pivots {
            highs: vec![1, 3],
            lows: vec![],
        };

        let t = segment_trend(&candles, &pivots);
        assert_eq!(t, vec![Side, Side, Side, Side, Up, Up]);
    }

    #[test]
    fn no_pivots_means_all_side() {
        let candles = closes(&[1.0, 2.0, 3.0]);
        assert_eq!(segment_trend(&candles, &Pivots::default()), vec![Side; 3]);
        assert!(segment_trend(&[], &Pivots::default()).is_empty());
    }

    #[test]
    fn dual_pivot_bar_counts_as_both() {
        let candles = closes(&[1.0, 1.0, 1.0, 1.0, 1.0]);
        let pivots = Pivots {
            highs: vec![3],
            lows: vec![1, 3],
        };

        // точки: 1(L), 3(H), 3(L) -> [1,3) up, [3,3) пусто, хвост с 3
        let t = segment_trend(&candles, &pivots);
        assert_eq!(t, vec![Side, Up, Up, Side, Side]);
    }
}
