//! # chromelog
//!
//! Reads visited-URL records from a Chromium-family browser's `History`
//! database and returns them newest first with local visit times.
//!
//! ```no_run
//! use chromelog::{config, extract};
//!
//! let loaded = config::load_config(None).unwrap();
//! let layout = loaded.config.layout(None);
//! let request = extract::ExtractRequest::new("alice").with_max_entries(10);
//! let (_target, report) = extract::extract_history(&layout, &request).unwrap();
//! for record in report.iter() {
//!     println!("{} {}", record.raw_visit_time, record.url);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod output;
pub mod process;
pub mod profile;
pub mod query;
pub mod reader;
pub mod report;
pub mod timestamp;

pub use error::HistoryError;
pub use extract::{ExtractRequest, extract_from_path, extract_history};
pub use report::{HistoryRecord, HistoryReport};
