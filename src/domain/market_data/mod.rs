//! Market data aggregate: candles, series and the timeframe vocabulary.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
