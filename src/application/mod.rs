pub mod chart_sync;
pub mod indicator_service;

pub use chart_sync::{ChartRegistration, ChartRole, ChartSyncCoordinator, RegistrationId, SyncStats};
pub use indicator_service::{
    IndicatorBundle, IndicatorService, IndicatorSettings, OverlaySeries, PaneSeries,
};
