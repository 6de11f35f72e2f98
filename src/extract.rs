//! # Extraction Pipeline
//!
//! locate → build query → open → read → normalize → report, once, on the
//! calling thread. The database handle lives only inside
//! [`extract_from_path`] and is closed before it returns on every path.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::HistoryError;
use crate::profile::{self, ProfileLayout, ProfileTarget};
use crate::query::QuerySpec;
use crate::reader::HistoryReader;
use crate::report::{self, HistoryReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRequest {
    pub user_name: String,
    pub profile_name: Option<String>,
    pub max_entries: u64,
}

impl ExtractRequest {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            profile_name: None,
            max_entries: 0,
        }
    }

    pub fn with_profile(mut self, profile_name: impl Into<String>) -> Self {
        self.profile_name = Some(profile_name.into());
        self
    }

    pub fn with_max_entries(mut self, max_entries: u64) -> Self {
        self.max_entries = max_entries;
        self
    }
}

pub fn extract_history(
    layout: &ProfileLayout,
    request: &ExtractRequest,
) -> Result<(ProfileTarget, HistoryReport), HistoryError> {
    let target = profile::locate(
        layout,
        &request.user_name,
        request.profile_name.as_deref(),
    )?;
    info!(
        "reading history user={} profile={} path={}",
        target.user_name(),
        target.profile_name(),
        target.database_path().display()
    );
    let report = extract_from_path(target.database_path(), &QuerySpec::new(request.max_entries))?;
    Ok((target, report))
}

pub fn extract_from_path(path: &Path, spec: &QuerySpec) -> Result<HistoryReport, HistoryError> {
    let result = read_report(path, spec);
    match &result {
        Ok(report) if report.is_empty() => info!("history table is empty: {}", path.display()),
        Ok(report) => debug!("read {} history records", report.count),
        Err(err @ HistoryError::DatabaseLocked { .. }) => warn!("{err}"),
        Err(err) => debug!("extraction failed kind={} error={err}", err.kind()),
    }
    result
}

fn read_report(path: &Path, spec: &QuerySpec) -> Result<HistoryReport, HistoryError> {
    let reader = HistoryReader::open(path)?;
    let mut query = reader.query(spec)?;
    let rows = query.rows()?;
    report::collect_report(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn layout(root: &Path) -> ProfileLayout {
        ProfileLayout {
            users_root: root.to_path_buf(),
            browser_data_dir: PathBuf::from("chrome"),
            history_file: "History".to_string(),
            default_profile: "Default".to_string(),
        }
    }

    fn seed(root: &Path, user: &str, profile: &str, times: &[i64]) -> PathBuf {
        let dir = root.join(user).join("chrome").join(profile);
        std::fs::create_dir_all(&dir).expect("dir");
        let path = dir.join("History");
        let conn = Connection::open(&path).expect("conn");
        conn.execute(
            "CREATE TABLE urls (id INTEGER PRIMARY KEY, url LONGVARCHAR, title LONGVARCHAR, last_visit_time INTEGER)",
            [],
        )
        .expect("create");
        for (i, time) in times.iter().enumerate() {
            conn.execute(
                "INSERT INTO urls (url, title, last_visit_time) VALUES (?1, ?2, ?3)",
                (format!("https://site{i}.example"), format!("Site {i}"), *time),
            )
            .expect("insert");
        }
        path
    }

    #[test]
    fn runs_the_full_pipeline() {
        let dir = tempdir().expect("tempdir");
        seed(dir.path(), "alice", "Default", &[13_300_000_000_000_000, 13_310_000_000_000_000]);
        let request = ExtractRequest::new("alice").with_max_entries(1);
        let (target, report) = extract_history(&layout(dir.path()), &request).expect("extract");
        assert_eq!(target.profile_name(), "Default");
        assert_eq!(report.count, 1);
        assert_eq!(report.records[0].raw_visit_time, 13_310_000_000_000_000);
    }

    #[test]
    fn locator_errors_stop_before_open() {
        let dir = tempdir().expect("tempdir");
        seed(dir.path(), "alice", "Default", &[]);
        let request = ExtractRequest::new("alice").with_profile("Profile 2");
        let err = extract_history(&layout(dir.path()), &request).expect_err("missing profile");
        assert!(matches!(err, HistoryError::DatabaseNotFound { .. }));
    }
}
