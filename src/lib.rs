//! Indicator engine and time-axis synchronization for the trade review
//! charts, compiled to wasm for the browser and usable natively.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::{ChartRegistration, ChartSyncCoordinator, IndicatorBundle, IndicatorService};
pub use domain::errors::{AppError, AppResult};

use domain::logging::LogComponent;
use wasm_bindgen::prelude::*;

/// Install the panic hook, console logger and browser clock.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    domain::logging::init_logger(Box::new(
        infrastructure::services::ConsoleLogger::new_development(),
    ));

    #[cfg(target_arch = "wasm32")]
    domain::logging::init_time_provider(Box::new(infrastructure::BrowserTimeProvider::new()));
    #[cfg(not(target_arch = "wasm32"))]
    domain::logging::init_time_provider(Box::new(infrastructure::SystemTimeProvider));

    crate::log_info!(LogComponent::Presentation("Initialize"), "chart core initialized");
}
