//! Зоны спроса / предложения.
//!
//! Кандидат — бар пивота и два следующих бара. Кандидат становится зоной,
//! если проходит все фильтры подряд:
//! 1. якорь — boring свеча;
//! 2. впереди импульс в сторону зоны (exciting свеча или FVG);
//! 3. сразу слева есть exciting свеча (любого направления);
//! 4. запас `candles_count` баров справа;
//! 5. ни один бар справа не закрылся за close якоря.
//!
//! Фильтр 5 смотрит до конца ряда, так что валидность зоны определяется
//! только задним числом.

use market::Bar;
use market::types::Price;

use crate::candle::{Classifier, Direction};
use crate::event::{EventSink, StructureEvent, ZoneRejection};
use crate::fvg::detect_gaps;
use crate::pivot::Pivots;

/// Пивот и два следующих бара
pub const ANCHOR_OFFSETS: usize = 3;
/// Сколько баров после якоря ищем exciting свечу
pub const FORWARD_BARS: usize = 5;
/// Окно (включая якорь) для поиска FVG
pub const GAP_LOOKAHEAD: usize = 6;
/// Сколько баров перед якорем ищем exciting свечу
pub const BACKWARD_BARS: usize = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    Demand,
    Supply,
}

impl ZoneKind {
    /// Направление импульса, подтверждающего зону
    pub fn momentum(self) -> Direction {
        match self {
            ZoneKind::Demand => Direction::Bullish,
            ZoneKind::Supply => Direction::Bearish,
        }
    }

    /// Закрытие за уровнем якоря ломает зону
    pub fn invalidates(self, close: Price, anchor_close: Price) -> bool {
        match self {
            ZoneKind::Demand => close.0 < anchor_close.0,
            ZoneKind::Supply => close.0 > anchor_close.0,
        }
    }
}

/// Подтверждённая зона. Диапазон цены — [low, high] бара-якоря.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Zone {
    pub kind: ZoneKind,
    pub anchor: usize,
    pub pivot: usize,
    pub low: Price,
    pub high: Price,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoneParams {
    /// Запас баров по обе стороны от пивота / якоря
    pub candles_count: usize,
    /// Порог старого ratio-варианта. Текущие фильтры его не читают.
    pub comparison_multiplier: f64,
}

impl Default for ZoneParams {
    fn default() -> Self {
        Self {
            candles_count: 10,
            comparison_multiplier: 1.1,
        }
    }
}

pub fn detect_demand_zones(
    candles: &[Bar],
    pivots: &Pivots,
    classifier: &Classifier<'_>,
    params: ZoneParams,
    sink: &mut dyn EventSink,
) -> Vec<Zone> {
    detect_zones(candles, &pivots.lows, ZoneKind::Demand, classifier, params, sink)
}

pub fn detect_supply_zones(
    candles: &[Bar],
    pivots: &Pivots,
    classifier: &Classifier<'_>,
    params: ZoneParams,
    sink: &mut dyn EventSink,
) -> Vec<Zone> {
    detect_zones(candles, &pivots.highs, ZoneKind::Supply, classifier, params, sink)
}

/// Зоны в порядке обхода пивотов (не обязательно по возрастанию позиции).
pub fn detect_zones(
    candles: &[Bar],
    pivots: &[usize],
    kind: ZoneKind,
    classifier: &Classifier<'_>,
    params: ZoneParams,
    sink: &mut dyn EventSink,
) -> Vec<Zone> {
    let n = candles.len();
    let margin = params.candles_count;
    let mut zones = Vec::new();

    for &pivot in pivots {
        if pivot < margin || pivot + margin >= n {
            sink.emit(StructureEvent::ZoneRejected {
                kind,
                anchor: pivot,
                reason: ZoneRejection::InsufficientMargin,
            });
            continue;
        }

        for anchor in (pivot..pivot + ANCHOR_OFFSETS).take_while(|&a| a < n) {
            match check_anchor(candles, anchor, kind, classifier, margin) {
                Ok(()) => {
                    let bar = &candles[anchor];
                    let zone = Zone {
                        kind,
                        anchor,
                        pivot,
                        low: bar.low,
                        high: bar.high,
                    };
                    sink.emit(StructureEvent::ZoneAccepted(zone));
                    zones.push(zone);
                }
                Err(reason) => sink.emit(StructureEvent::ZoneRejected {
                    kind,
                    anchor,
                    reason,
                }),
            }
        }
    }

    if zones.is_empty() {
        sink.emit(StructureEvent::NoZones(kind));
    }

    zones
}

fn check_anchor(
    candles: &[Bar],
    anchor: usize,
    kind: ZoneKind,
    classifier: &Classifier<'_>,
    margin: usize,
) -> Result<(), ZoneRejection> {
    let n = candles.len();
    let bar = &candles[anchor];

    if !classifier.is_boring(bar) {
        return Err(ZoneRejection::NotBoring);
    }

    if !has_forward_momentum(candles, anchor, kind, classifier) {
        return Err(ZoneRejection::NoForwardMomentum);
    }

    let exciting_left = (1..=BACKWARD_BARS)
        .filter_map(|d| anchor.checked_sub(d))
        .any(|j| classifier.is_exciting(&candles[j]));
    if !exciting_left {
        return Err(ZoneRejection::NoBackwardMomentum);
    }

    if anchor + margin >= n {
        return Err(ZoneRejection::InsufficientMargin);
    }

    let broken = candles[anchor + 1..]
        .iter()
        .position(|c| kind.invalidates(c.close, bar.close));
    if let Some(offset) = broken {
        return Err(ZoneRejection::Invalidated {
            by: anchor + 1 + offset,
        });
    }

    Ok(())
}

/// Exciting свеча в сторону зоны среди следующих баров, либо FVG того же
/// направления в окне, начинающемся с якоря
fn has_forward_momentum(
    candles: &[Bar],
    anchor: usize,
    kind: ZoneKind,
    classifier: &Classifier<'_>,
) -> bool {
    let wanted = kind.momentum();

    let exciting = candles
        .iter()
        .skip(anchor + 1)
        .take(FORWARD_BARS)
        .any(|c| classifier.excitement(c) == Some(wanted));

    if exciting {
        return true;
    }

    let end = (anchor + GAP_LOOKAHEAD).min(candles.len());
    detect_gaps(&candles[anchor..end])
        .iter()
        .any(|g| g.direction == wanted)
}
