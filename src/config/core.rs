use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use std::path::{Path, PathBuf};

use super::{Settings, smart_load};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Repository-level config file names, lowest priority first
const REPO_CONFIG_FILES: [&str; 4] = ["ombscan.toml", "ombscan.json", "ombscan.yaml", "ombscan.yml"];

pub struct OmbscanConfig {
    figment: Figment,
}

impl OmbscanConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        // If custom config is specified, use only that + defaults + env vars
        if let Some(custom_path) = custom_config {
            if !custom_path.is_file() {
                bail!("Config file '{}' does not exist", custom_path.display());
            }
            tracing::debug!("Loading config from {}", custom_path.display());
            figment = figment.merge(smart_load::auto(custom_path));
        } else {
            // Standard priority: user config -> repo config
            if let Some(user_dir) = Self::user_config_dir() {
                figment = figment
                    .merge(Toml::file(user_dir.join("config.toml")))
                    .merge(Json::file(user_dir.join("config.json")))
                    .merge(Yaml::file(user_dir.join("config.yaml")))
                    .merge(Yaml::file(user_dir.join("config.yml")));
            }
            for name in REPO_CONFIG_FILES {
                figment = figment.merge(smart_load::auto(name));
            }
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("OMBSCAN_").split("__"));

        Ok(OmbscanConfig { figment })
    }

    /// Extract and validate the merged settings
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .context("Failed to parse configuration")?;
        settings.scan.validate().context("Invalid configuration")?;
        Ok(settings)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        let settings = self.settings()?;
        toml::to_string_pretty(&settings).context("Failed to render configuration as TOML")
    }

    fn user_config_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config").join("ombscan"))
    }
}
