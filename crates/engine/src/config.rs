use clap::{Args, ValueEnum};

use structure::candle::{CandleRules, RangeRules, StrictRules};
use structure::pivot::DEFAULT_WINDOW;
use structure::zone::ZoneParams;
use structure::AnalysisParams;

/// Набор правил классификации свечей
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RulesArg {
    /// body / range
    Range,
    /// body / range + средние по ряду
    Strict,
}

impl RulesArg {
    pub fn rules(self) -> &'static dyn CandleRules {
        match self {
            RulesArg::Range => &RangeRules,
            RulesArg::Strict => &StrictRules,
        }
    }
}

/// Общие параметры анализа для обоих бинарников
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Баров слева и справа от пивота
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Запас баров вокруг пивота / якоря зоны
    #[arg(long, default_value_t = 10)]
    pub candles_count: usize,

    #[arg(long, default_value_t = 1.1)]
    pub comparison_multiplier: f64,

    #[arg(long, value_enum, default_value_t = RulesArg::Range)]
    pub rules: RulesArg,
}

impl AnalysisArgs {
    pub fn params(&self) -> AnalysisParams {
        AnalysisParams {
            window: self.window,
            zones: ZoneParams {
                candles_count: self.candles_count,
                comparison_multiplier: self.comparison_multiplier,
            },
        }
    }
}
