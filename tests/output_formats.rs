//! Rendering of reports through each sink.

mod common;

use chromelog::output::{self, OutputFormatKind, Provenance};
use chromelog::query::QuerySpec;
use chromelog::{HistoryReport, extract_from_path};

use common::{BASE_VISIT_TIME, Fixture, insert_url};

fn sample_report() -> (Fixture, std::path::PathBuf, HistoryReport) {
    let fixture = Fixture::new();
    let path = fixture.create_history("alice", "Default");
    insert_url(&path, "https://old.example/", "Old, \"quoted\"", BASE_VISIT_TIME);
    insert_url(&path, "https://new.example/", "New", BASE_VISIT_TIME + 1_000_000);
    insert_url(&path, "https://never.example/", "", 0);
    let report = extract_from_path(&path, &QuerySpec::unbounded()).expect("report");
    (fixture, path, report)
}

fn render(kind: OutputFormatKind, provenance: &Provenance, report: &HistoryReport) -> String {
    let mut buf = Vec::new();
    {
        let mut sink = output::build_sink(kind, provenance, Box::new(&mut buf)).expect("sink");
        output::write_report(sink.as_mut(), report).expect("write");
    }
    String::from_utf8(buf).expect("utf8")
}

#[test]
fn jsonl_has_one_line_per_record_with_provenance() {
    let (_fixture, path, report) = sample_report();
    let provenance = Provenance::new("0.0.0", "abc123", &path).with_profile("alice", "Default");
    let text = render(OutputFormatKind::Jsonl, &provenance, &report);

    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("json"))
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["url"], "https://new.example/");
    assert_eq!(lines[0]["raw_visit_time"], BASE_VISIT_TIME + 1_000_000);
    assert_eq!(lines[0]["profile"], "Default");
    assert_eq!(lines[0]["config_hash"], "abc123");
    assert!(lines[0]["visit_time_local"].is_string());
    assert_eq!(lines[2]["raw_visit_time"], 0);
    assert!(lines[2]["visit_time_local"].is_null());
}

#[test]
fn jsonl_and_csv_carry_the_same_fields() {
    let (_fixture, path, report) = sample_report();
    let provenance = Provenance::new("0.0.0", "abc123", &path).with_profile("alice", "Default");

    let jsonl = render(OutputFormatKind::Jsonl, &provenance, &report);
    let first: serde_json::Value =
        serde_json::from_str(jsonl.lines().next().expect("line")).expect("json");
    let mut json_keys: Vec<String> = first.as_object().expect("object").keys().cloned().collect();
    json_keys.sort();

    let csv_text = render(OutputFormatKind::Csv, &provenance, &report);
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers = reader.headers().expect("headers").clone();
    let mut csv_keys: Vec<String> = headers.iter().map(str::to_string).collect();
    csv_keys.sort();
    assert_eq!(json_keys, csv_keys);

    let database_column = headers
        .iter()
        .position(|h| h == "database_path")
        .expect("database_path column");
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(&rows[0][database_column], path.to_string_lossy().as_ref());
    assert_eq!(first["database_path"], path.to_string_lossy().as_ref());
}

#[test]
fn csv_has_header_and_quoted_fields() {
    let (_fixture, path, report) = sample_report();
    let provenance = Provenance::new("0.0.0", "abc123", &path);
    let text = render(OutputFormatKind::Csv, &provenance, &report);

    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers().expect("headers").clone();
    assert_eq!(&headers[0], "url");
    assert_eq!(&headers[3], "visit_time_local");
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[1][1], "Old, \"quoted\"");
    assert_eq!(&rows[2][3], "");
}

#[test]
fn csv_of_empty_report_is_header_only() {
    let text = render(
        OutputFormatKind::Csv,
        &Provenance::default(),
        &HistoryReport::default(),
    );
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn table_shows_sentinel_and_count() {
    let (_fixture, path, report) = sample_report();
    let text = render(OutputFormatKind::Table, &Provenance::new("0", "", &path), &report);
    assert!(text.contains("Visited"));
    assert!(text.contains("https://new.example/"));
    assert!(text.contains(output::NEVER_VISITED));
    assert!(text.trim_end().ends_with("3 records"));
}

#[test]
fn table_of_empty_report_says_so() {
    let text = render(
        OutputFormatKind::Table,
        &Provenance::default(),
        &HistoryReport::default(),
    );
    assert_eq!(text.trim(), "no history records found");
}
