//! Data models for RebuildLab.
//!
//! - [`ParameterSpec`]: declaration of an integer parameter (name, default, optional bounds)
//! - [`ConfigParameter`]: a declared parameter together with its current value
//! - [`ParamChange`]: one value that changed during a commit
//! - [`LabSettings`]: settings persisted in `RebuildLab Settings.yaml`
//!
//! Parameter values live in a [`ReactiveConfigStore`](crate::store::ReactiveConfigStore);
//! the types here only describe them.

pub mod config;
pub mod parameter;

pub use self::config::{
    BUTTONS_PARAM, COLUMNS_PARAM, INITIAL_PARAM, LabSettings, MAX_BUTTONS, default_parameters,
};
pub use self::parameter::{ConfigParameter, ParamChange, ParamMap, ParameterSpec};
