use std::collections::VecDeque;

use market::Bar;

pub const DEFAULT_WINDOW: usize = 5;

/// Тип пивота
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PivotKind {
    High,
    Low,
}

/// Major highs / lows ряда. Одна позиция может попасть в оба списка.
///
/// Инвариант: оба списка строго по возрастанию, на нём держатся
/// `is_high` / `is_low` (бинарный поиск) и порядок в `detect_breaks`.
/// `detect_pivots` строит их так сам, произвольные списки — через `new`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pivots {
    pub highs: Vec<usize>,
    pub lows: Vec<usize>,
}

impl Pivots {
    /// Сортирует и убирает дубли
    pub fn new(mut highs: Vec<usize>, mut lows: Vec<usize>) -> Self {
        highs.sort_unstable();
        highs.dedup();
        lows.sort_unstable();
        lows.dedup();
        Self { highs, lows }
    }

    pub fn is_empty(&self) -> bool {
        self.highs.is_empty() && self.lows.is_empty()
    }

    pub fn is_high(&self, pos: usize) -> bool {
        self.highs.binary_search(&pos).is_ok()
    }

    pub fn is_low(&self, pos: usize) -> bool {
        self.lows.binary_search(&pos).is_ok()
    }

    /// Все пивоты одним списком по возрастанию (дубли сохраняются)
    pub fn merged(&self) -> Vec<(usize, PivotKind)> {
        let mut all: Vec<_> = self
            .highs
            .iter()
            .map(|&p| (p, PivotKind::High))
            .chain(self.lows.iter().map(|&p| (p, PivotKind::Low)))
            .collect();
        all.sort_by_key(|&(p, _)| p);
        all
    }
}

/// Проверка: является ли свеча pivot high
pub fn is_pivot_high(candles: &[Bar], i: usize, k: usize) -> bool {
    if k == 0 || i < k || k >= candles.len().saturating_sub(i) {
        return false;
    }

    let hi = candles[i].high.0;

    candles[i - k..i].iter().all(|c| c.high.0 < hi)
        && candles[i + 1..=i + k].iter().all(|c| c.high.0 < hi)
}

/// Проверка: является ли свеча pivot low
pub fn is_pivot_low(candles: &[Bar], i: usize, k: usize) -> bool {
    if k == 0 || i < k || k >= candles.len().saturating_sub(i) {
        return false;
    }

    let lo = candles[i].low.0;

    candles[i - k..i].iter().all(|c| c.low.0 > lo)
        && candles[i + 1..=i + k].iter().all(|c| c.low.0 > lo)
}

/// Экстремумы скользящего окна ширины `k`.
/// `out[j]` (j >= k) = экстремум `values[j - k..j]`, остальные `None`.
/// NaN в окне даёт NaN: любое сравнение с ним ложно, как в `is_pivot_*`.
fn trailing_extremes(values: &[f64], k: usize, dominates: impl Fn(f64, f64) -> bool) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len() + 1];
    let mut window: VecDeque<usize> = VecDeque::with_capacity(k + 1);
    let mut last_nan: Option<usize> = None;

    for (j, &v) in values.iter().enumerate() {
        if v.is_nan() {
            last_nan = Some(j);
        } else {
            while window.back().is_some_and(|&b| dominates(v, values[b])) {
                window.pop_back();
            }
            window.push_back(j);
        }

        while window.front().is_some_and(|&f| f + k <= j) {
            window.pop_front();
        }

        if j + 1 >= k {
            out[j + 1] = if last_nan.is_some_and(|p| p + k > j) {
                Some(f64::NAN)
            } else {
                window.front().map(|&f| values[f])
            };
        }
    }

    out
}

/// Major highs / lows за один проход, O(n).
/// Эквивалентно `is_pivot_high` / `is_pivot_low` для каждой позиции,
/// включая ряды с NaN.
pub fn detect_pivots(candles: &[Bar], k: usize) -> Pivots {
    let n = candles.len();
    // n >= 2k + 1 без переполнения
    if k == 0 || n == 0 || k > (n - 1) / 2 {
        return Pivots::default();
    }

    let highs: Vec<f64> = candles.iter().map(|c| c.high.0).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low.0).collect();

    let max_before = trailing_extremes(&highs, k, |a, b| a >= b);
    let min_before = trailing_extremes(&lows, k, |a, b| a <= b);

    let mut pivots = Pivots::default();

    for i in k..n - k {
        // окно после i: [i + 1, i + k + 1) == "до" позиции i + k + 1
        let (before, after) = (max_before[i], max_before[i + k + 1]);
        if let (Some(b), Some(a)) = (before, after) {
            if highs[i] > b && highs[i] > a {
                pivots.highs.push(i);
            }
        }

        let (before, after) = (min_before[i], min_before[i + k + 1]);
        if let (Some(b), Some(a)) = (before, after) {
            if lows[i] < b && lows[i] < a {
                pivots.lows.push(i);
            }
        }
    }

    pivots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bar, flat_bar, with_high};

    fn wave(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let x = i as f64;
                let mid = 100.0 + (x * 0.7).sin() * 10.0 + (x * 0.23).cos() * 4.0;
                let spread = 1.0 + (x * 1.9).sin().abs() * 3.0;
                bar(mid, mid + spread, mid - spread, mid + 0.5)
            })
            .collect()
    }

    #[test]
    fn sliding_pass_matches_naive_check() {
        let candles = wave(200);

        for k in 1..=7 {
            let p = detect_pivots(&candles, k);

            let naive_highs: Vec<_> = (0..candles.len())
                .filter(|&i| is_pivot_high(&candles, i, k))
                .collect();
            let naive_lows: Vec<_> = (0..candles.len())
                .filter(|&i| is_pivot_low(&candles, i, k))
                .collect();

            assert_eq!(p.highs, naive_highs, "highs, k={k}");
            assert_eq!(p.lows, naive_lows, "lows, k={k}");
        }
    }

    #[test]
    fn pivot_high_exceeds_whole_window() {
        let candles = wave(120);
        let k = DEFAULT_WINDOW;

        for &i in &detect_pivots(&candles, k).highs {
            let hi = candles[i].high.0;
            assert!(candles[i - k..i].iter().all(|c| c.high.0 < hi));
            assert!(candles[i + 1..=i + k].iter().all(|c| c.high.0 < hi));
        }
        for &i in &detect_pivots(&candles, k).lows {
            let lo = candles[i].low.0;
            assert!(candles[i - k..i].iter().all(|c| c.low.0 > lo));
            assert!(candles[i + 1..=i + k].iter().all(|c| c.low.0 > lo));
        }
    }

    #[test]
    fn ties_do_not_qualify() {
        let candles: Vec<_> = [10.0, 12.0, 12.0, 9.0, 8.0].into_iter().map(with_high).collect();
        assert!(detect_pivots(&candles, 1).highs.is_empty());
    }

    #[test]
    fn same_bar_can_be_high_and_low() {
        let mut candles = vec![flat_bar(10.0), flat_bar(10.0)];
        candles.insert(1, bar(10.0, 20.0, 1.0, 10.0));

        let p = detect_pivots(&candles, 1);
        assert_eq!(p.highs, vec![1]);
        assert_eq!(p.lows, vec![1]);
        assert_eq!(p.merged(), vec![(1, PivotKind::High), (1, PivotKind::Low)]);
    }

    #[test]
    fn too_short_or_zero_window_is_empty() {
        let candles = wave(10);
        assert!(detect_pivots(&candles, 5).is_empty());
        assert!(detect_pivots(&candles, 0).is_empty());
        assert!(detect_pivots(&[], 1).is_empty());
        assert!(!is_pivot_high(&candles, 3, 0));
    }

    #[test]
    fn huge_window_is_empty_not_overflow() {
        let candles = wave(50);

        assert!(detect_pivots(&candles, usize::MAX / 2 + 1).is_empty());
        assert!(detect_pivots(&candles, usize::MAX).is_empty());
        assert!(!is_pivot_high(&candles, 10, usize::MAX));
        assert!(!is_pivot_low(&candles, 10, usize::MAX));
    }

    #[test]
    fn nan_in_window_blocks_pivot_like_naive_check() {
        let mut candles = wave(60);
        candles[22].high.0 = f64::NAN;
        candles[31].low.0 = f64::NAN;

        for k in 1..=5 {
            let p = detect_pivots(&candles, k);

            let naive_highs: Vec<_> = (0..candles.len())
                .filter(|&i| is_pivot_high(&candles, i, k))
                .collect();
            let naive_lows: Vec<_> = (0..candles.len())
                .filter(|&i| is_pivot_low(&candles, i, k))
                .collect();

            assert_eq!(p.highs, naive_highs, "highs, k={k}");
            assert_eq!(p.lows, naive_lows, "lows, k={k}");
        }
    }

    #[test]
    fn new_sorts_and_dedups() {
        let p = Pivots::new(vec![7, 2, 7, 4], vec![3, 1]);

        assert_eq!(p.highs, vec![2, 4, 7]);
        assert_eq!(p.lows, vec![1, 3]);
        assert!(p.is_high(4) && !p.is_high(3));
        assert!(p.is_low(1));
    }
}
