use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "TODO.txt";
pub const CONFIG_FILE_NAME: &str = "tolige.config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Set configuration to read; `<config dir>/tolige.config` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    #[serde(default = "default_output")]
    pub default_output: String,
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_file: None,
            default_output: default_output(),
        }
    }
}

pub struct SettingsManager {
    config_dir: PathBuf,
    settings: Settings,
}

impl SettingsManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("tolige");
        Self::new_with_dir(config_dir)
    }

    pub fn new_with_dir(config_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

        let settings_file = config_dir.join("settings.yaml");
        let settings = if settings_file.exists() {
            let contents =
                fs::read_to_string(&settings_file).context("Failed to read settings file")?;
            serde_yaml::from_str(&contents).context("Failed to parse settings file")?
        } else {
            let default_settings = Settings::default();
            let yaml_content = serde_yaml::to_string(&default_settings)
                .context("Failed to serialize default settings")?;
            fs::write(&settings_file, yaml_content)
                .context("Failed to write default settings file")?;
            default_settings
        };

        Ok(Self {
            config_dir,
            settings,
        })
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The set configuration to read. Relative paths in the settings file are
    /// resolved against the config directory.
    pub fn config_file(&self) -> PathBuf {
        match &self.settings.config_file {
            Some(path) if path.is_relative() => self.config_dir.join(path),
            Some(path) => path.clone(),
            None => self.config_dir.join(CONFIG_FILE_NAME),
        }
    }

    pub fn default_output(&self) -> &Path {
        Path::new(&self.settings.default_output)
    }
}
