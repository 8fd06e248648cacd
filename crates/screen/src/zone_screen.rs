use market::Bar;
use market::types::{Price, Ratio};

use structure::proximity::ClosestZones;

/// Причина решения (для логов / отчёта)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ZoneScreenReason {
    NoDemandZone,
    NoSupplyZone,
    DemandTooFar,
    SupplyTooClose,
    Passed,
}

/// Параметры скрина
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoneScreenParams {
    /// Насколько low последнего бара может быть выше high demand-зоны
    pub demand_tolerance: Ratio,
    /// Минимальный отступ high последнего бара от low supply-зоны
    pub supply_clearance: Ratio,
}

impl Default for ZoneScreenParams {
    fn default() -> Self {
        Self {
            demand_tolerance: Ratio(0.05),
            supply_clearance: Ratio(0.05),
        }
    }
}

/// Решение скрина
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ZoneScreenDecision {
    pub demand_ok: bool,
    pub supply_ok: bool,
    pub reason: ZoneScreenReason,
}

impl ZoneScreenDecision {
    pub fn passed(&self) -> bool {
        self.reason == ZoneScreenReason::Passed
    }
}

/// Цена чуть выше demand-зоны и с запасом до supply-зоны
pub fn zone_screen(last: &Bar, closest: &ClosestZones, params: ZoneScreenParams) -> ZoneScreenDecision {
    // 1) нужны обе зоны
    let Some(demand) = closest.demand else {
        return ZoneScreenDecision {
            demand_ok: false,
            supply_ok: false,
            reason: ZoneScreenReason::NoDemandZone,
        };
    };
    let Some(supply) = closest.supply else {
        return ZoneScreenDecision {
            demand_ok: false,
            supply_ok: false,
            reason: ZoneScreenReason::NoSupplyZone,
        };
    };

    // 2) low последнего бара над зоной, но не дальше tolerance
    let ceiling: Price = demand.high.scaled(params.demand_tolerance);
    let demand_ok = last.low.0 > demand.high.0 && last.low.0 <= ceiling.0;

    // 3) high последнего бара ниже supply с отступом
    let floor: Price = supply.low.scaled(Ratio(-params.supply_clearance.0));
    let supply_ok = last.high.0 < floor.0;

    let reason = match (demand_ok, supply_ok) {
        (false, _) => ZoneScreenReason::DemandTooFar,
        (true, false) => ZoneScreenReason::SupplyTooClose,
        (true, true) => ZoneScreenReason::Passed,
    };

    ZoneScreenDecision {
        demand_ok,
        supply_ok,
        reason,
    }
}
