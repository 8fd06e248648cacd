use market::types::Price;

/// Положение close относительно split lines
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SplitPosition {
    /// не выше нижней линии
    Lower,
    /// между линиями (верхняя включительно)
    Middle,
    Upper,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SplitScreenReason {
    NoSplitLines,
    AboveUpperSplit,
    Passed,
}

pub fn split_position(close: Price, (lower, upper): (Price, Price)) -> SplitPosition {
    if close.0 <= lower.0 {
        SplitPosition::Lower
    } else if close.0 <= upper.0 {
        SplitPosition::Middle
    } else {
        SplitPosition::Upper
    }
}

/// Close в нижних двух третях между demand и supply
pub fn split_screen(close: Price, split_lines: Option<(Price, Price)>) -> SplitScreenReason {
    let Some(lines) = split_lines else {
        return SplitScreenReason::NoSplitLines;
    };

    match split_position(close, lines) {
        SplitPosition::Upper => SplitScreenReason::AboveUpperSplit,
        SplitPosition::Lower | SplitPosition::Middle => SplitScreenReason::Passed,
    }
}
