use std::io::Write;

use tabled::{Table, Tabled};

use crate::output::{HistorySink, OutputError, display_visit_time};
use crate::report::HistoryRecord;

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Visited")]
    visited: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "URL")]
    url: String,
}

/// Buffers rows and prints one table when the report is finished.
pub struct TableSink<'w> {
    rows: Vec<HistoryRow>,
    writer: Box<dyn Write + 'w>,
}

impl<'w> TableSink<'w> {
    pub fn new(writer: Box<dyn Write + 'w>) -> Self {
        Self {
            rows: Vec::new(),
            writer,
        }
    }
}

impl HistorySink for TableSink<'_> {
    fn record(&mut self, record: &HistoryRecord) -> Result<(), OutputError> {
        self.rows.push(HistoryRow {
            visited: display_visit_time(record),
            title: record.title.clone(),
            url: record.url.clone(),
        });
        Ok(())
    }

    fn finish(&mut self, count: usize) -> Result<(), OutputError> {
        if count == 0 {
            writeln!(self.writer, "no history records found")?;
        } else {
            let rows = std::mem::take(&mut self.rows);
            writeln!(self.writer, "{}", Table::new(rows))?;
            writeln!(self.writer, "{count} records")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
