// RebuildLab - observable configuration driving a rebuildable button grid
//
// This is the library crate containing the observable, the configuration
// store and the view models. The binary crate (main.rs) is a console front end.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod observable;
pub mod store;
pub mod ui;

// Re-export commonly used types for convenience
pub use crate::config::ConfigManager;
pub use error::{ConfigError, PaneError};
pub use models::{ConfigParameter, LabSettings, ParamChange, ParamMap, ParameterSpec};
pub use observable::{Observable, SubscriptionHandle};
pub use store::ReactiveConfigStore;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
