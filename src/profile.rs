//! # Profile Locator
//!
//! Resolves `<users_root>/<user>/<browser_data_dir>/<profile>/<history_file>`
//! and checks it exists before anything opens it.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::HistoryError;

/// Where browser profiles live on this machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLayout {
    pub users_root: PathBuf,
    pub browser_data_dir: PathBuf,
    pub history_file: String,
    pub default_profile: String,
}

impl ProfileLayout {
    /// The user's browser data folder, parent of all profile folders.
    pub fn base_dir(&self, user_name: &str) -> PathBuf {
        self.users_root.join(user_name).join(&self.browser_data_dir)
    }
}

/// A validated history database for one user and profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTarget {
    user_name: String,
    profile_name: String,
    database_path: PathBuf,
}

impl ProfileTarget {
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }
}

pub fn locate(
    layout: &ProfileLayout,
    user_name: &str,
    profile_name: Option<&str>,
) -> Result<ProfileTarget, HistoryError> {
    let user_name = user_name.trim();
    validate_component("user name", user_name)?;
    let profile_name = profile_name
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(layout.default_profile.as_str());
    validate_component("profile name", profile_name)?;

    let base_dir = layout.base_dir(user_name);
    if !is_dir(&base_dir)? {
        debug!("missing browser data folder {}", base_dir.display());
        return Err(HistoryError::ProfileNotFound { path: base_dir });
    }

    let database_path = base_dir.join(profile_name).join(&layout.history_file);
    match std::fs::metadata(&database_path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(HistoryError::DatabaseNotFound { path: database_path }),
        Err(err) => return Err(classify_io(err, database_path)),
    }

    debug!("located history database {}", database_path.display());
    Ok(ProfileTarget {
        user_name: user_name.to_string(),
        profile_name: profile_name.to_string(),
        database_path,
    })
}

/// Profile folder names under the user's data folder that hold a history file.
pub fn list_profiles(layout: &ProfileLayout, user_name: &str) -> Result<Vec<String>, HistoryError> {
    let user_name = user_name.trim();
    validate_component("user name", user_name)?;
    let base_dir = layout.base_dir(user_name);
    let entries = match std::fs::read_dir(&base_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(HistoryError::ProfileNotFound { path: base_dir });
        }
        Err(err) => return Err(classify_io(err, base_dir)),
    };

    let mut profiles = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| classify_io(err, base_dir.clone()))?;
        if !entry.path().join(&layout.history_file).is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            profiles.push(name.to_string());
        }
    }
    profiles.sort();
    Ok(profiles)
}

fn validate_component(label: &str, value: &str) -> Result<(), HistoryError> {
    if value.is_empty() {
        return Err(HistoryError::InvalidInput(format!("{label} must not be empty")));
    }
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !value.contains(['/', '\\']) => Ok(()),
        _ => Err(HistoryError::InvalidInput(format!(
            "{label} must be a single folder name, got {value:?}"
        ))),
    }
}

fn is_dir(path: &Path) -> Result<bool, HistoryError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(classify_io(err, path.to_path_buf())),
    }
}

fn classify_io(err: io::Error, path: PathBuf) -> HistoryError {
    match err.kind() {
        io::ErrorKind::PermissionDenied => HistoryError::AccessDenied { path },
        _ => HistoryError::DatabaseNotFound { path },
    }
}
