//! Informational check for a running browser.
//!
//! A live browser usually holds its own profile's database locked. Finding a
//! process with a matching name only produces a warning: it may belong to a
//! different user or profile, and extraction is attempted either way.

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningBrowser {
    pub pid: u32,
    pub name: String,
}

/// Running processes whose name matches one of `names` (case-insensitive).
pub fn find_running_browsers(names: &[String]) -> Vec<RunningBrowser> {
    if names.is_empty() {
        return Vec::new();
    }
    let mut system = System::new_with_specifics(
        RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
    );
    system.refresh_processes(ProcessesToUpdate::All, true);

    let mut found: Vec<RunningBrowser> = system
        .processes()
        .iter()
        .filter_map(|(pid, process)| {
            let name = process.name().to_string_lossy().into_owned();
            matches_any(&name, names).then(|| RunningBrowser {
                pid: pid.as_u32(),
                name,
            })
        })
        .collect();
    found.sort_by_key(|b| b.pid);
    found
}

/// Log a warning per matching process; returns how many were found.
pub fn warn_if_browser_running(names: &[String]) -> usize {
    let found = find_running_browsers(names);
    for browser in &found {
        warn!(
            "browser process '{}' (pid {}) is running; its history database may be locked",
            browser.name, browser.pid
        );
    }
    found.len()
}

fn matches_any(process_name: &str, names: &[String]) -> bool {
    names
        .iter()
        .any(|candidate| process_name.eq_ignore_ascii_case(candidate.trim()))
}
