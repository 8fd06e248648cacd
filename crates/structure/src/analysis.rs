//! Полный проход детекторов по одному ряду, в порядке зависимостей:
//! средние -> гэпы / пивоты -> пробои / зоны -> тренд / ближайшие зоны.

use market::BarSeries;
use market::types::Price;

use crate::bos::{StructureBreak, detect_breaks};
use crate::candle::{CandleRules, CandleStats, Classifier};
use crate::event::{EventSink, StructureEvent};
use crate::fvg::{Gap, detect_gaps};
use crate::pivot::{DEFAULT_WINDOW, Pivots, detect_pivots};
use crate::proximity::{ClosestZones, calculate_split_lines, find_closest_zones};
use crate::trend::{Trend, segment_trend};
use crate::zone::{Zone, ZoneParams, detect_demand_zones, detect_supply_zones};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnalysisParams {
    /// Окно пивота (баров слева и справа)
    pub window: usize,
    pub zones: ZoneParams,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            zones: ZoneParams::default(),
        }
    }
}

/// Результат анализа. Все позиции — индексы в тот же `BarSeries`.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub stats: CandleStats,
    pub gaps: Vec<Gap>,
    pub pivots: Pivots,
    pub breaks: Vec<StructureBreak>,
    pub demand: Vec<Zone>,
    pub supply: Vec<Zone>,
    pub trend: Vec<Trend>,
    pub closest: ClosestZones,
    pub split_lines: Option<(Price, Price)>,
}

pub fn analyze(
    series: &BarSeries,
    params: AnalysisParams,
    rules: &dyn CandleRules,
    sink: &mut dyn EventSink,
) -> Analysis {
    let candles = series.bars();

    let stats = CandleStats::from_series(series);
    let classifier = Classifier::new(rules, stats);

    let gaps = detect_gaps(candles);
    sink.emit(StructureEvent::GapsFound { count: gaps.len() });

    let pivots = detect_pivots(candles, params.window);
    sink.emit(StructureEvent::PivotsFound {
        highs: pivots.highs.len(),
        lows: pivots.lows.len(),
    });

    let breaks = detect_breaks(candles, &pivots);
    sink.emit(StructureEvent::BreaksFound {
        count: breaks.len(),
    });

    let demand = detect_demand_zones(candles, &pivots, &classifier, params.zones, sink);
    let supply = detect_supply_zones(candles, &pivots, &classifier, params.zones, sink);

    let trend = segment_trend(candles, &pivots);

    let closest = series
        .last()
        .map(|last| find_closest_zones(last.close, &demand, &supply))
        .unwrap_or_default();

    let split_lines = match (&closest.demand, &closest.supply) {
        (Some(d), Some(s)) => Some(calculate_split_lines(d, s)),
        _ => None,
    };

    Analysis {
        stats,
        gaps,
        pivots,
        breaks,
        demand,
        supply,
        trend,
        closest,
        split_lines,
    }
}
