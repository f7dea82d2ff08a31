use crate::models::LabSettings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the settings file inside the configuration directory.
pub const SETTINGS_FILE: &str = "RebuildLab Settings.yaml";

/// Prefix of environment variables that override settings (`REBUILDLAB_DEBUG_MODE=true`).
pub const ENV_PREFIX: &str = "REBUILDLAB";

/// Configuration manager for loading and saving [`LabSettings`].
///
/// Loading layers, lowest priority first:
/// - built-in defaults
/// - `RebuildLab Settings.yaml` in the configuration directory (optional)
/// - `REBUILDLAB_*` environment variables (scalar settings only)
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager, creating `config_dir` if needed.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILE),
            config_dir,
        })
    }

    /// Load settings from the file and the process environment.
    pub fn load_settings(&self) -> Result<LabSettings> {
        self.load_settings_with_env(None)
    }

    /// Load settings, reading overrides from `env` instead of the process
    /// environment when it is `Some`.
    ///
    /// Keys in `env` are full variable names, e.g. `REBUILDLAB_CONSOLE_LOG`.
    pub fn load_settings_with_env(
        &self,
        env: Option<::config::Map<String, String>>,
    ) -> Result<LabSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::from(self.settings_path.as_std_path())
                    .format(::config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: LabSettings = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!(
            "Loaded settings: {} parameters, debug={}",
            settings.parameters.len(),
            settings.debug_mode
        );
        Ok(settings)
    }

    /// Save settings as YAML.
    pub fn save_settings(&self, settings: &LabSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the settings file path.
    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}
