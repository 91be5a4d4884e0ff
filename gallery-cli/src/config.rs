// ABOUTME: Configuration file loading, validation, and hierarchical merging for the gallery CLI
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use anyhow::{anyhow, Context, Result};
use gallery_sdk::constants::env;
use gallery_sdk::{CloudinaryConfig, GalleryError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::Format;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Replaces the environment's cloud name, or supplies it when
    /// `CLOUDINARY_CLOUD_NAME` is unset and only the key and secret are set
    #[serde(default)]
    pub cloud_name: Option<String>,
    #[serde(default)]
    pub preferred_format: Option<Format>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub delivery_host: Option<String>,
    #[serde(default)]
    pub secure: Option<bool>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        Self::load_from_paths(&paths)
    }

    /// Load configuration from file paths, later paths overriding earlier ones.
    /// Missing files are skipped; unreadable or invalid files are errors.
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                continue;
            }
            log::debug!("Loading config from {}", path.display());
            config = config.merge(Self::load_from_file(path)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Standard config file paths, lowest precedence first
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".config").join("gallery").join("config.toml"));
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(config_home).join("gallery").join("config.toml"));
        }

        // 3. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join("gallery.toml"));
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            cloud_name: other.cloud_name.or(self.cloud_name),
            preferred_format: other.preferred_format.or(self.preferred_format),
            api_url: other.api_url.or(self.api_url),
            delivery_host: other.delivery_host.or(self.delivery_host),
            secure: other.secure.or(self.secure),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(ref cloud_name) = self.cloud_name {
            if cloud_name.trim().is_empty() {
                return Err(anyhow!("cloud_name must not be empty"));
            }
        }

        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// Client settings read through `lookup` (normally the environment), with
    /// this file's `cloud_name` filling in a missing `CLOUDINARY_CLOUD_NAME`
    pub fn client_config<F>(&self, lookup: F) -> Result<CloudinaryConfig, GalleryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        CloudinaryConfig::from_lookup(|name| {
            let value = lookup(name).filter(|v| !v.trim().is_empty());
            if value.is_none() && name == env::CLOUD_NAME {
                return self.cloud_name.clone();
            }
            value
        })
    }

    /// The file's cloud name when it differs from the one already configured
    pub fn cloud_name_override(&self, client_config: &CloudinaryConfig) -> Option<&str> {
        self.cloud_name
            .as_deref()
            .filter(|name| *name != client_config.cloud_name)
    }

    /// Apply file settings on top of the credentials read from the environment
    pub fn apply_to(&self, mut client_config: CloudinaryConfig) -> CloudinaryConfig {
        if let Some(cloud_name) = &self.cloud_name {
            client_config.cloud_name = cloud_name.clone();
        }
        if let Some(api_url) = &self.api_url {
            client_config.api_base_url = Some(api_url.clone());
        }
        if let Some(host) = &self.delivery_host {
            client_config.delivery_host = Some(host.clone());
        }
        if let Some(secure) = self.secure {
            client_config.secure = secure;
        }
        if let Some(secs) = self.timeout_secs {
            client_config.timeout = Duration::from_secs(secs);
        }
        client_config
    }
}
