//! Shared fixtures for extraction tests.
//!
//! Builds throwaway user/profile trees with a Chromium-shaped `urls` table
//! inside a temp directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tempfile::TempDir;

use chromelog::profile::ProfileLayout;

// ============================================================================
// Fixture Tree
// ============================================================================

pub const BROWSER_DIR: &str = "google-chrome";

/// Raw visit time of the first seeded row; later rows are one second apart.
pub const BASE_VISIT_TIME: i64 = 13_300_000_000_000_000;

pub struct Fixture {
    pub root: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn layout(&self) -> ProfileLayout {
        ProfileLayout {
            users_root: self.root.path().to_path_buf(),
            browser_data_dir: PathBuf::from(BROWSER_DIR),
            history_file: "History".to_string(),
            default_profile: "Default".to_string(),
        }
    }

    pub fn profile_dir(&self, user: &str, profile: &str) -> PathBuf {
        self.root.path().join(user).join(BROWSER_DIR).join(profile)
    }

    /// Create `user/profile/History` with an empty `urls` table.
    pub fn create_history(&self, user: &str, profile: &str) -> PathBuf {
        let dir = self.profile_dir(user, profile);
        std::fs::create_dir_all(&dir).expect("profile dir");
        let path = dir.join("History");
        create_urls_table(&path);
        path
    }
}

// ============================================================================
// Database Helpers
// ============================================================================

pub fn create_urls_table(path: &Path) {
    let conn = Connection::open(path).expect("conn");
    conn.execute_batch(
        "CREATE TABLE urls (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url LONGVARCHAR,
            title LONGVARCHAR,
            visit_count INTEGER DEFAULT 0 NOT NULL,
            typed_count INTEGER DEFAULT 0 NOT NULL,
            last_visit_time INTEGER NOT NULL,
            hidden INTEGER DEFAULT 0 NOT NULL
        );",
    )
    .expect("create urls");
}

pub fn insert_url(path: &Path, url: &str, title: &str, last_visit_time: i64) {
    let conn = Connection::open(path).expect("conn");
    conn.execute(
        "INSERT INTO urls (url, title, last_visit_time) VALUES (?1, ?2, ?3)",
        (url, title, last_visit_time),
    )
    .expect("insert url");
}

/// Insert `count` rows in a scrambled time order so ordering is exercised.
pub fn seed_rows(path: &Path, count: usize) {
    let mut conn = Connection::open(path).expect("conn");
    let tx = conn.transaction().expect("tx");
    for i in 0..count {
        // 37 is coprime with every count used in tests, so each slot appears once.
        let slot = (i * 37) % count;
        tx.execute(
            "INSERT INTO urls (url, title, last_visit_time) VALUES (?1, ?2, ?3)",
            (
                format!("https://site{slot}.example/"),
                format!("Site {slot}"),
                BASE_VISIT_TIME + slot as i64 * 1_000_000,
            ),
        )
        .expect("insert");
    }
    tx.commit().expect("commit");
}
