use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use tempo_core::EditorConfig;

/// CLI configuration loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Pretty-print JSON output by default
    #[serde(default)]
    pub pretty: bool,

    /// Treat NOT arity problems as validation errors
    #[serde(default)]
    pub strict_not_arity: bool,

    /// Editor profile, overriding TEMPO_PROFILE
    #[serde(default)]
    pub profile: Option<String>,
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/tempo/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("tempo");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            debug!(?config_path, "Loading config");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config)
        } else {
            debug!(?config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Editor config from the environment, with this file's overrides applied.
    pub fn editor_config(&self) -> EditorConfig {
        let mut config = match &self.profile {
            Some(profile) => EditorConfig::for_profile(profile),
            None => EditorConfig::from_env(),
        };
        config.strict_not_arity |= self.strict_not_arity;
        config
    }
}
