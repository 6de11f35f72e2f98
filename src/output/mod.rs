//! # Output
//!
//! Renders a [`HistoryReport`] to any writer as a console table, JSON lines
//! or CSV. Rendering never alters the order or content of the report.

pub mod csv;
pub mod jsonl;
pub mod table;

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::report::{HistoryRecord, HistoryReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatKind {
    Table,
    Jsonl,
    Csv,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Where a report came from, stamped onto machine-readable rows.
#[derive(Debug, Clone, Default)]
pub struct Provenance {
    pub tool_version: String,
    pub config_hash: String,
    pub user_name: String,
    pub profile_name: String,
    pub database_path: PathBuf,
}

impl Provenance {
    pub fn new(tool_version: &str, config_hash: &str, database_path: &Path) -> Self {
        Self {
            tool_version: tool_version.to_string(),
            config_hash: config_hash.to_string(),
            database_path: database_path.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_profile(mut self, user_name: &str, profile_name: &str) -> Self {
        self.user_name = user_name.to_string();
        self.profile_name = profile_name.to_string();
        self
    }
}

pub trait HistorySink {
    fn record(&mut self, record: &HistoryRecord) -> Result<(), OutputError>;
    /// Called once after the last record with the report's count.
    fn finish(&mut self, count: usize) -> Result<(), OutputError>;
}

pub fn build_sink<'w>(
    kind: OutputFormatKind,
    provenance: &Provenance,
    writer: Box<dyn Write + 'w>,
) -> Result<Box<dyn HistorySink + 'w>, OutputError> {
    match kind {
        OutputFormatKind::Table => Ok(Box::new(table::TableSink::new(writer))),
        OutputFormatKind::Jsonl => Ok(Box::new(jsonl::JsonlSink::new(provenance, writer))),
        OutputFormatKind::Csv => Ok(Box::new(csv::CsvSink::new(provenance, writer)?)),
    }
}

pub fn write_report<S>(sink: &mut S, report: &HistoryReport) -> Result<(), OutputError>
where
    S: HistorySink + ?Sized,
{
    for record in report.iter() {
        sink.record(record)?;
    }
    sink.finish(report.count)
}

/// Sentinel shown when the browser recorded no visit time.
pub const NEVER_VISITED: &str = "never";

/// Local visit time for display, or a sentinel for unrecorded/invalid values.
pub fn display_visit_time(record: &HistoryRecord) -> String {
    match record.visit_time_local {
        Some(dt) if record.has_visit_time() => dt.format("%Y-%m-%d %H:%M:%S %:z").to_string(),
        Some(_) => NEVER_VISITED.to_string(),
        None => format!("invalid ({})", record.raw_visit_time),
    }
}

/// RFC 3339 visit time for machine-readable rows; `None` when unrecorded or
/// out of range, so JSONL and CSV agree on what "never" looks like.
pub fn machine_visit_time(record: &HistoryRecord) -> Option<String> {
    record
        .visit_time_local
        .filter(|_| record.has_visit_time())
        .map(|t| t.to_rfc3339())
}
