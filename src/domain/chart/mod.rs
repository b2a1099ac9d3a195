//! Chart aggregate: visible range, toolbar configuration and the handle
//! abstraction over a rendered chart.

pub mod config;
pub mod handle;
pub mod value_objects;

pub use config::*;
pub use handle::*;
pub use value_objects::*;
