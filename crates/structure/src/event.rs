use crate::zone::{Zone, ZoneKind};

/// Почему кандидат в зону отброшен
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ZoneRejection {
    NotBoring,
    NoForwardMomentum,
    NoBackwardMomentum,
    InsufficientMargin,
    /// Позиция бара, закрывшегося за уровнем якоря
    Invalidated { by: usize },
}

/// События детекторов (для логов / отчётов)
#[derive(Debug, Clone, PartialEq)]
pub enum StructureEvent {
    GapsFound { count: usize },
    PivotsFound { highs: usize, lows: usize },
    BreaksFound { count: usize },
    ZoneAccepted(Zone),
    ZoneRejected {
        kind: ZoneKind,
        anchor: usize,
        reason: ZoneRejection,
    },
    NoZones(ZoneKind),
}

/// Куда детекторы отдают события. Сами детекторы ничего не логируют.
pub trait EventSink {
    fn emit(&mut self, event: StructureEvent);
}

/// Выбрасывает все события
#[derive(Debug, Default, Copy, Clone)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: StructureEvent) {}
}

/// Запись событий (тесты, отчёты)
impl EventSink for Vec<StructureEvent> {
    fn emit(&mut self, event: StructureEvent) {
        self.push(event);
    }
}
