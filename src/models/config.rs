use super::parameter::{ParamMap, ParameterSpec};
use serde::{Deserialize, Serialize};

/// Parameter controlling the number of grid columns.
pub const COLUMNS_PARAM: &str = "Columns";

/// Parameter controlling the number of counter buttons.
pub const BUTTONS_PARAM: &str = "Buttons";

/// Optional parameter giving the starting count of every button.
pub const INITIAL_PARAM: &str = "Initial";

/// Largest button grid the pane will build.
pub const MAX_BUTTONS: usize = 1024;

/// Settings loaded from `RebuildLab Settings.yaml`
///
/// Keys are snake_case so they can also be overridden from
/// `REBUILDLAB_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabSettings {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default)]
    pub debug_mode: bool,

    #[serde(default)]
    pub console_log: bool,

    #[serde(default = "default_persist_values")]
    pub persist_values: bool,

    #[serde(default = "default_parameters")]
    pub parameters: Vec<ParameterSpec>,
}

impl Default for LabSettings {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            debug_mode: false,
            console_log: false,
            persist_values: default_persist_values(),
            parameters: default_parameters(),
        }
    }
}

impl LabSettings {
    /// Copy of these settings with parameter defaults replaced by `values`.
    ///
    /// Names missing from `values` keep their old default.
    pub fn with_current_values(&self, values: &ParamMap) -> Self {
        let mut settings = self.clone();
        for spec in &mut settings.parameters {
            if let Some(value) = values.get(&spec.name) {
                spec.default = *value;
            }
        }
        settings
    }
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_persist_values() -> bool {
    true
}

/// The two parameters of the running example: a 2-column grid of 10 buttons.
pub fn default_parameters() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::new(COLUMNS_PARAM, 2).with_bounds(Some(1), Some(64)),
        ParameterSpec::new(BUTTONS_PARAM, 10).with_bounds(Some(0), Some(MAX_BUTTONS as i64)),
    ]
}
