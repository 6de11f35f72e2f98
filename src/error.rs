//! # Error Taxonomy
//!
//! Every failure of an extraction run maps to exactly one [`HistoryError`].
//! Nothing is retried internally; callers decide what to tell the user.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("profile folder not found: {}", path.display())]
    ProfileNotFound { path: PathBuf },
    #[error("history database not found: {}", path.display())]
    DatabaseNotFound { path: PathBuf },
    #[error("access denied: {}", path.display())]
    AccessDenied { path: PathBuf },
    #[error("history database is locked: {}", path.display())]
    DatabaseLocked { path: PathBuf },
    #[error("query failed on {}: {message}", path.display())]
    QueryFailed { path: PathBuf, message: String },
}

impl HistoryError {
    /// Short kind label used in logs and machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            HistoryError::InvalidInput(_) => "invalid_input",
            HistoryError::ProfileNotFound { .. } => "profile_not_found",
            HistoryError::DatabaseNotFound { .. } => "database_not_found",
            HistoryError::AccessDenied { .. } => "access_denied",
            HistoryError::DatabaseLocked { .. } => "database_locked",
            HistoryError::QueryFailed { .. } => "query_failed",
        }
    }

    /// What a human can do about it, if anything.
    pub fn remedy(&self) -> Option<&'static str> {
        match self {
            HistoryError::DatabaseLocked { .. } => Some("close the browser and retry"),
            HistoryError::AccessDenied { .. } => {
                Some("rerun with permission to read the target user's profile")
            }
            HistoryError::ProfileNotFound { .. } => {
                Some("check the user name; the user may never have run this browser")
            }
            HistoryError::DatabaseNotFound { .. } => {
                Some("check the profile name (e.g. \"Default\", \"Profile 1\")")
            }
            HistoryError::InvalidInput(_) | HistoryError::QueryFailed { .. } => None,
        }
    }

    /// Process exit code for the binary; distinct per kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            HistoryError::InvalidInput(_) => 2,
            HistoryError::ProfileNotFound { .. } => 3,
            HistoryError::DatabaseNotFound { .. } => 4,
            HistoryError::AccessDenied { .. } => 5,
            HistoryError::DatabaseLocked { .. } => 6,
            HistoryError::QueryFailed { .. } => 7,
        }
    }

    /// True when rerunning after a human action (closing the browser) can succeed.
    pub fn is_retryable_by_user(&self) -> bool {
        matches!(self, HistoryError::DatabaseLocked { .. })
    }
}
