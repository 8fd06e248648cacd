use market::types::Price;

use crate::zone::Zone;

/// Ближайшие к текущей цене зоны
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClosestZones {
    pub demand: Option<Zone>,
    pub supply: Option<Zone>,
}

/// Demand — по расстоянию от low зоны, supply — от high зоны.
/// При равенстве берётся первая зона в порядке входа.
pub fn find_closest_zones(last_close: Price, demand: &[Zone], supply: &[Zone]) -> ClosestZones {
    ClosestZones {
        demand: closest_by(demand, |z| z.low.distance(last_close)),
        supply: closest_by(supply, |z| z.high.distance(last_close)),
    }
}

fn closest_by(zones: &[Zone], distance: impl Fn(&Zone) -> f64) -> Option<Zone> {
    zones
        .iter()
        .copied()
        .min_by(|a, b| distance(a).total_cmp(&distance(b)))
}

/// Два уровня, делящие [demand.high, supply.low] на три равные части
pub fn calculate_split_lines(demand: &Zone, supply: &Zone) -> (Price, Price) {
    let bottom = demand.high.0;
    let step = (supply.low.0 - bottom) / 3.0;

    (Price(bottom + step), Price(bottom + 2.0 * step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ZoneKind;

    fn zone(kind: ZoneKind, anchor: usize, low: f64, high: f64) -> Zone {
        Zone {
            kind,
            anchor,
            pivot: anchor,
            low: Price(low),
            high: Price(high),
        }
    }

    #[test]
    fn demand_and_supply_minimised_independently() {
        let demand = [
            zone(ZoneKind::Demand, 3, 80.0, 82.0),
            zone(ZoneKind::Demand, 9, 95.0, 97.0),
        ];
        let supply = [
            zone(ZoneKind::Supply, 5, 118.0, 120.0),
            zone(ZoneKind::Supply, 12, 104.0, 106.0),
        ];

        let c = find_closest_zones(Price(100.0), &demand, &supply);
        assert_eq!(c.demand.map(|z| z.anchor), Some(9));
        assert_eq!(c.supply.map(|z| z.anchor), Some(12));
    }

    #[test]
    fn ties_keep_first_zone() {
        let demand = [
            zone(ZoneKind::Demand, 7, 90.0, 92.0),
            zone(ZoneKind::Demand, 2, 110.0, 112.0),
        ];

        let c = find_closest_zones(Price(100.0), &demand, &[]);
        assert_eq!(c.demand.map(|z| z.anchor), Some(7));
        assert!(c.supply.is_none());
    }

    #[test]
    fn empty_input_has_no_closest() {
        assert_eq!(find_closest_zones(Price(1.0), &[], &[]), ClosestZones::default());
    }

    #[test]
    fn split_lines_divide_gap_in_thirds() {
        let d = zone(ZoneKind::Demand, 1, 95.0, 100.0);
        let s = zone(ZoneKind::Supply, 2, 130.0, 135.0);

        let (a, b) = calculate_split_lines(&d, &s);
        assert!((a.0 - 110.0).abs() < 1e-9);
        assert!((b.0 - 120.0).abs() < 1e-9);
    }
}
