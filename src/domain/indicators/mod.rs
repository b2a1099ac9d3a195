//! Technical indicator engine.
//!
//! Every function here is pure: it borrows a candle slice, allocates a fresh
//! output vector and never fails. Input shorter than an indicator's warm-up
//! window produces an empty series, which callers read as "not enough data
//! yet". All emitted values are rounded to two decimals.

pub mod atr;
pub mod bollinger;
pub mod macd;
pub mod metadata;
pub mod moving_average;
pub mod points;
pub mod rsi;

pub use atr::{calculate_atr, true_range};
pub use bollinger::calculate_bollinger;
pub use macd::calculate_macd;
pub use metadata::*;
pub use moving_average::{calculate_ema, calculate_ema_group, calculate_sma};
pub use points::*;
pub use rsi::{calculate_rsi, calculate_single_rsi};
