//! # History Reader
//!
//! Opens a Chromium `History` database strictly read-only and streams
//! `(url, title, last_visit_time)` rows. A running browser may hold the file
//! locked; that is reported once as [`HistoryError::DatabaseLocked`] without
//! waiting or retrying.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ErrorCode, OpenFlags, Row, Rows, Statement};
use tracing::debug;

use crate::error::HistoryError;
use crate::query::{QuerySpec, build_query};

/// One row as stored, before timestamp conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub url: String,
    pub title: String,
    pub raw_visit_time: i64,
}

/// Read-only handle on a history database. Dropping it closes the connection.
pub struct HistoryReader {
    conn: Connection,
    path: PathBuf,
}

impl HistoryReader {
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        probe_file(path)?;
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|err| classify(err, path))?;
        // Fail on the first busy/locked result instead of sleeping.
        conn.busy_timeout(Duration::ZERO)
            .map_err(|err| classify(err, path))?;
        debug!("opened history database {}", path.display());
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prepare the statement for `spec`. Schema reads happen here, so a locked
    /// file usually surfaces at this point.
    pub fn query(&self, spec: &QuerySpec) -> Result<HistoryQuery<'_>, HistoryError> {
        let sql = build_query(spec);
        debug!("preparing history query: {sql}");
        let stmt = self
            .conn
            .prepare(&sql)
            .map_err(|err| classify(err, &self.path))?;
        Ok(HistoryQuery {
            stmt,
            path: &self.path,
            started: false,
        })
    }
}

pub struct HistoryQuery<'conn> {
    stmt: Statement<'conn>,
    path: &'conn Path,
    started: bool,
}

impl HistoryQuery<'_> {
    /// Start the row stream. A query can be streamed once.
    pub fn rows(&mut self) -> Result<RawRows<'_>, HistoryError> {
        if self.started {
            return Err(HistoryError::InvalidInput(
                "history rows were already streamed for this query".to_string(),
            ));
        }
        self.started = true;
        let path = self.path;
        let rows = self.stmt.query([]).map_err(|err| classify(err, path))?;
        Ok(RawRows {
            rows,
            path,
            done: false,
        })
    }
}

/// Lazy, finite stream of rows. Fused after the first error.
pub struct RawRows<'stmt> {
    rows: Rows<'stmt>,
    path: &'stmt Path,
    done: bool,
}

impl Iterator for RawRows<'_> {
    type Item = Result<RawRow, HistoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = match self.rows.next() {
            Ok(Some(row)) => read_row(row),
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.done = true;
        }
        Some(result.map_err(|err| classify(err, self.path)))
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    let url: String = row.get(0)?;
    let title = lossy_text(row.get_ref(1)?);
    let raw_visit_time: Option<i64> = row.get(2)?;
    Ok(RawRow {
        url,
        title,
        raw_visit_time: raw_visit_time.unwrap_or(0),
    })
}

/// Titles are free text; bad UTF-8 is replaced rather than failing the row.
fn lossy_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
    }
}

/// Map an engine error to its kind by result code, never by message text.
pub fn classify(err: rusqlite::Error, path: &Path) -> HistoryError {
    let path_buf = path.to_path_buf();
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        match failure.code {
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                return HistoryError::DatabaseLocked { path: path_buf };
            }
            ErrorCode::PermissionDenied | ErrorCode::AuthorizationForStatementDenied => {
                return HistoryError::AccessDenied { path: path_buf };
            }
            ErrorCode::CannotOpen => {
                if let Err(probe_err) = probe_file(path) {
                    return probe_err;
                }
            }
            _ => {}
        }
    }
    HistoryError::QueryFailed {
        path: path_buf,
        message: err.to_string(),
    }
}

fn probe_file(path: &Path) -> Result<(), HistoryError> {
    let file = File::open(path).map_err(|err| classify_io(err, path))?;
    let meta = file.metadata().map_err(|err| classify_io(err, path))?;
    if !meta.is_file() {
        return Err(HistoryError::DatabaseNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn classify_io(err: io::Error, path: &Path) -> HistoryError {
    let path = path.to_path_buf();
    if is_sharing_violation(&err) {
        return HistoryError::DatabaseLocked { path };
    }
    match err.kind() {
        io::ErrorKind::NotFound => HistoryError::DatabaseNotFound { path },
        io::ErrorKind::PermissionDenied => HistoryError::AccessDenied { path },
        _ => HistoryError::QueryFailed {
            path,
            message: err.to_string(),
        },
    }
}

#[cfg(windows)]
fn is_sharing_violation(err: &io::Error) -> bool {
    // ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
    matches!(err.raw_os_error(), Some(32) | Some(33))
}

#[cfg(not(windows))]
fn is_sharing_violation(_err: &io::Error) -> bool {
    false
}
