use tracing::{debug, info};

use structure::event::{EventSink, StructureEvent};

/// Пересылает события детекторов в tracing
pub struct TracingSink<'a> {
    pub symbol: &'a str,
}

impl<'a> TracingSink<'a> {
    pub fn new(symbol: &'a str) -> Self {
        Self { symbol }
    }
}

impl EventSink for TracingSink<'_> {
    fn emit(&mut self, event: StructureEvent) {
        let symbol = self.symbol;

        match event {
            StructureEvent::GapsFound { count } => {
                info!(symbol, count, "gaps detected");
            }
            StructureEvent::PivotsFound { highs, lows } => {
                info!(symbol, highs, lows, "pivots detected");
            }
            StructureEvent::BreaksFound { count } => {
                info!(symbol, count, "structure breaks detected");
            }
            StructureEvent::ZoneAccepted(z) => {
                info!(
                    symbol,
                    kind = ?z.kind,
                    anchor = z.anchor,
                    pivot = z.pivot,
                    low = z.low.0,
                    high = z.high.0,
                    "zone accepted"
                );
            }
            StructureEvent::ZoneRejected {
                kind,
                anchor,
                reason,
            } => {
                debug!(symbol, ?kind, anchor, ?reason, "zone rejected");
            }
            StructureEvent::NoZones(kind) => {
                info!(symbol, ?kind, "no zones found");
            }
        }
    }
}
