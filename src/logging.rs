//! Logging setup. Logs go to stderr so stdout carries only the report.

use tracing_subscriber::EnvFilter;

/// Environment variable selecting `json` log lines instead of plain text.
pub const LOG_FORMAT_ENV: &str = "CHROMELOG_LOG_FORMAT";

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
