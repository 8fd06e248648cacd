pub mod analysis;
pub mod bos;
pub mod candle;
pub mod event;
pub mod fvg;
pub mod pivot;
pub mod proximity;
pub mod trend;
pub mod zone;

pub use analysis::{Analysis, AnalysisParams, analyze};
pub use candle::{CandleRules, Direction, RangeRules, StrictRules};
pub use event::{EventSink, NullSink, StructureEvent};

#[cfg(test)]
mod test_support;
