pub mod chart;
pub mod errors;
pub mod indicators;
pub mod logging;
pub mod market_data;
