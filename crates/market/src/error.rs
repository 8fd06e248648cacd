use thiserror::Error;

use crate::types::TimestampMs;

/// Ошибки перехода между позицией бара и его timestamp.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarketError {
    #[error("no bar with timestamp {0}")]
    UnknownTimestamp(TimestampMs),

    #[error("position {pos} is out of range for a series of {len} bars")]
    PositionOutOfRange { pos: usize, len: usize },
}
