//! Хелперы для тестов: бары без timestamp-шума.

use market::types::TimestampMs;
use market::{Bar, BarSeries};

pub const MINUTE_MS: i64 = 60_000;

/// Бар с объёмом по умолчанию
pub fn bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
    Bar::new(TimestampMs(0), open, high, low, close, 1_000.0)
}

/// open = high = low = close
pub fn flat_bar(price: f64) -> Bar {
    bar(price, price, price, price)
}

/// Бар с заданным high, диапазон 2, тело 0 (посередине)
pub fn with_high(high: f64) -> Bar {
    bar(high - 1.0, high, high - 2.0, high - 1.0)
}

/// Проставить возрастающие timestamp и собрать ряд
pub fn series(bars: Vec<Bar>) -> BarSeries {
    let bars = bars
        .into_iter()
        .enumerate()
        .map(|(i, mut b)| {
            b.ts = TimestampMs(i as i64 * MINUTE_MS);
            b
        })
        .collect();

    BarSeries::new("TEST", bars)
}

/// Падение двумя импульсами, тихий бар (major low на позиции 3),
/// рост двумя импульсами, затем боковик выше close якоря.
pub fn demand_fixture() -> Vec<Bar> {
    vec![
        bar(110.0, 111.0, 109.0, 110.0),
        bar(110.0, 111.0, 105.5, 106.0),
        bar(106.0, 106.5, 101.5, 102.0),
        bar(102.0, 103.0, 100.0, 101.5),
        bar(101.5, 106.5, 101.0, 106.0),
        bar(106.0, 110.5, 105.5, 110.0),
        bar(110.0, 111.0, 109.0, 110.0),
        bar(110.0, 111.0, 109.0, 110.5),
        bar(110.0, 111.0, 109.0, 110.5),
    ]
}

/// Детерминированный "шумный" ряд для проверки свойств
pub fn noisy(n: usize, seed: u64) -> Vec<Bar> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    let mut price = 100.0;
    (0..n)
        .map(|_| {
            let open = price;
            let close = open + (next() - 0.5) * 6.0;
            let high = open.max(close) + next() * 2.0;
            let low = open.min(close) - next() * 2.0;
            price = close;

            let mut b = bar(open, high, low, close);
            b.volume.0 = 500.0 + next() * 1_000.0;
            b
        })
        .collect()
}
