pub mod momentum;
pub mod rank;
pub mod split_screen;
pub mod volatility;
pub mod zone_screen;
