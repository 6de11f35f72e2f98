use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::profile::ProfileLayout;

/// Browser user-data folder per OS, as path segments below a user's home.
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserDataDirConfig {
    pub windows: Vec<String>,
    pub macos: Vec<String>,
    pub linux: Vec<String>,
}

impl BrowserDataDirConfig {
    pub fn for_current_os(&self) -> PathBuf {
        let segments = if cfg!(target_os = "windows") {
            &self.windows
        } else if cfg!(target_os = "macos") {
            &self.macos
        } else {
            &self.linux
        };
        segments.iter().collect()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub users_root: Option<PathBuf>,
    pub browser_data_dir: BrowserDataDirConfig,
    pub history_file: String,
    pub default_profile: String,
    #[serde(default)]
    pub max_entries: u64,
    #[serde(default)]
    pub browser_processes: Vec<String>,
}

impl Config {
    /// Filesystem layout for the locator; `users_root` overrides the config value.
    pub fn layout(&self, users_root: Option<&Path>) -> ProfileLayout {
        let users_root = users_root
            .map(Path::to_path_buf)
            .or_else(|| self.users_root.clone())
            .unwrap_or_else(default_users_root);
        ProfileLayout {
            users_root,
            browser_data_dir: self.browser_data_dir.for_current_os(),
            history_file: self.history_file.clone(),
            default_profile: self.default_profile.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub config_hash: String,
}

pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig> {
    let bytes: Vec<u8> = if let Some(p) = path {
        std::fs::read(p)?
    } else {
        include_bytes!("../config/default.yml").to_vec()
    };

    let config: Config = serde_yaml::from_slice(&bytes)?;
    if config.history_file.trim().is_empty() {
        bail!("config: history_file must not be empty");
    }
    if config.default_profile.trim().is_empty() {
        bail!("config: default_profile must not be empty");
    }

    let config_hash = hash_bytes(&bytes);

    Ok(LoadedConfig { config, config_hash })
}

pub fn default_users_root() -> PathBuf {
    if cfg!(target_os = "windows") {
        PathBuf::from(r"C:\Users")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("/Users")
    } else {
        PathBuf::from("/home")
    }
}

fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    hex::encode(digest)
}
