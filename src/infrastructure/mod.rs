pub mod scheduler;
pub mod services;

pub use scheduler::{AnimationFrameScheduler, ManualFrameScheduler};
pub use services::{BrowserTimeProvider, ConsoleLogger, SystemTimeProvider};
