pub mod bar;
pub mod error;
pub mod series;
pub mod types;

pub use bar::Bar;
pub use error::MarketError;
pub use series::BarSeries;
