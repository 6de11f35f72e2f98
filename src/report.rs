//! # Result Reporter
//!
//! Turns the reader's raw rows into [`HistoryRecord`]s in emission order.
//! The first error ends collection and is returned as-is; no partial set is
//! ever handed back alongside it.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::HistoryError;
use crate::reader::RawRow;
use crate::timestamp;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    pub url: String,
    pub title: String,
    pub raw_visit_time: i64,
    /// `None` only when the raw value is outside the representable calendar.
    pub visit_time_local: Option<DateTime<Local>>,
}

impl HistoryRecord {
    pub fn from_raw(row: RawRow) -> Self {
        let visit_time_local = timestamp::normalize(row.raw_visit_time);
        Self {
            url: row.url,
            title: row.title,
            raw_visit_time: row.raw_visit_time,
            visit_time_local,
        }
    }

    /// False for `0`/negative raw values, which the browser uses for "never".
    pub fn has_visit_time(&self) -> bool {
        timestamp::is_recorded(self.raw_visit_time) && self.visit_time_local.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryReport {
    pub records: Vec<HistoryRecord>,
    pub count: usize,
}

impl HistoryReport {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryRecord> {
        self.records.iter()
    }
}

pub fn collect_report<I>(rows: I) -> Result<HistoryReport, HistoryError>
where
    I: IntoIterator<Item = Result<RawRow, HistoryError>>,
{
    let records = rows
        .into_iter()
        .map(|row| row.map(HistoryRecord::from_raw))
        .collect::<Result<Vec<_>, _>>()?;
    let count = records.len();
    Ok(HistoryReport { records, count })
}
