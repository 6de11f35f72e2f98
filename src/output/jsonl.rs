use std::io::Write;

use serde::Serialize;

use crate::output::{HistorySink, OutputError, Provenance, machine_visit_time};
use crate::report::HistoryRecord;

pub struct JsonlSink<'w> {
    tool_version: String,
    config_hash: String,
    user_name: String,
    profile_name: String,
    database_path: String,
    writer: Box<dyn Write + 'w>,
}

#[derive(Serialize)]
struct HistoryRecordLine<'a> {
    url: &'a str,
    title: &'a str,
    raw_visit_time: i64,
    visit_time_local: Option<String>,
    user: &'a str,
    profile: &'a str,
    database_path: &'a str,
    tool_version: &'a str,
    config_hash: &'a str,
}

impl<'w> JsonlSink<'w> {
    pub fn new(provenance: &Provenance, writer: Box<dyn Write + 'w>) -> Self {
        Self {
            tool_version: provenance.tool_version.clone(),
            config_hash: provenance.config_hash.clone(),
            user_name: provenance.user_name.clone(),
            profile_name: provenance.profile_name.clone(),
            database_path: provenance.database_path.to_string_lossy().to_string(),
            writer,
        }
    }
}

impl HistorySink for JsonlSink<'_> {
    fn record(&mut self, record: &HistoryRecord) -> Result<(), OutputError> {
        let line = HistoryRecordLine {
            url: &record.url,
            title: &record.title,
            raw_visit_time: record.raw_visit_time,
            visit_time_local: machine_visit_time(record),
            user: &self.user_name,
            profile: &self.profile_name,
            database_path: &self.database_path,
            tool_version: &self.tool_version,
            config_hash: &self.config_hash,
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self, _count: usize) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}
