//! # Query Builder
//!
//! Column and table names follow Chromium's `History` schema.

use crate::error::HistoryError;

pub const URLS_TABLE: &str = "urls";
pub const URL_COLUMN: &str = "url";
pub const TITLE_COLUMN: &str = "title";
pub const VISIT_TIME_COLUMN: &str = "last_visit_time";

const SQLITE_MAX_LIMIT: u64 = i64::MAX as u64;

/// What to fetch. Rows are always ordered by raw visit time, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuerySpec {
    /// `0` means no limit.
    pub max_entries: u64,
}

impl QuerySpec {
    pub fn new(max_entries: u64) -> Self {
        Self { max_entries }
    }

    pub fn unbounded() -> Self {
        Self { max_entries: 0 }
    }

    pub fn is_bounded(&self) -> bool {
        self.max_entries > 0
    }

    /// Validate externally supplied text as a non-negative integer.
    pub fn parse(text: &str) -> Result<Self, HistoryError> {
        let trimmed = text.trim();
        trimmed.parse::<u64>().map(Self::new).map_err(|_| {
            HistoryError::InvalidInput(format!(
                "max entries must be a non-negative integer, got {trimmed:?}"
            ))
        })
    }
}

pub fn build_query(spec: &QuerySpec) -> String {
    let mut sql = format!(
        "SELECT {URL_COLUMN}, {TITLE_COLUMN}, {VISIT_TIME_COLUMN} FROM {URLS_TABLE} ORDER BY {VISIT_TIME_COLUMN} DESC"
    );
    if spec.is_bounded() {
        // SQLite integers are i64; anything larger is read as REAL and rejected.
        let limit = spec.max_entries.min(SQLITE_MAX_LIMIT);
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    sql
}
