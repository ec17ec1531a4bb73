//! Testing utilities.
//!
//! Builds throw-away cross-seed databases so tests can exercise the real
//! loader instead of hand-made record lists.
//!
//! # Example
//!
//! ```rust,ignore
//! use pollinator_core::testing::fixtures::CrossSeedFixture;
//!
//! let fixture = CrossSeedFixture::new();
//! fixture.add_torrent("abc123", "Movie.2020.mkv", Some("/data"));
//! fixture.add_decision("abc123", "https://blutopia.cc/torrents/1", "MATCH", 1);
//! ```

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    use rusqlite::{params, Connection};
    use tempfile::TempDir;

    use crate::database::{MatchRecord, MatchStatus};

    const SCHEMA: &str = r#"
        CREATE TABLE client_searchee (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            info_hash TEXT NOT NULL,
            name TEXT NOT NULL,
            save_path TEXT,
            client_host TEXT
        );

        CREATE TABLE decision (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            searchee_id INTEGER,
            guid TEXT,
            info_hash TEXT,
            decision TEXT,
            first_seen INTEGER,
            last_seen,
            fuzzy_size_factor REAL
        );
    "#;

    const SCHEMA_WITHOUT_SAVE_PATH: &str = r#"
        CREATE TABLE client_searchee (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            info_hash TEXT NOT NULL,
            name TEXT NOT NULL
        );

        CREATE TABLE decision (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            guid TEXT,
            info_hash TEXT,
            decision TEXT,
            last_seen
        );
    "#;

    /// A cross-seed database in a temporary directory.
    ///
    /// The directory and file are removed when the fixture is dropped.
    pub struct CrossSeedFixture {
        conn: Connection,
        path: PathBuf,
        dir: TempDir,
    }

    impl CrossSeedFixture {
        /// Database with the cross-seed schema and no rows.
        pub fn new() -> Self {
            let fixture = Self::empty();
            fixture.execute(SCHEMA);
            fixture
        }

        /// Database using the older schema without `save_path`.
        pub fn without_save_path() -> Self {
            let fixture = Self::empty();
            fixture.execute(SCHEMA_WITHOUT_SAVE_PATH);
            fixture
        }

        /// Database file without any tables.
        pub fn empty() -> Self {
            let dir = TempDir::new().expect("Failed to create temp dir");
            let path = dir.path().join("cross-seed.db");
            let conn = Connection::open(&path).expect("Failed to create fixture database");
            Self {
                conn,
                path,
                dir,
            }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        /// Directory holding the database, handy for output files.
        pub fn dir(&self) -> &Path {
            self.dir.path()
        }

        /// Run arbitrary SQL against the fixture.
        pub fn execute(&self, sql: &str) {
            self.conn
                .execute_batch(sql)
                .expect("Failed to execute fixture SQL");
        }

        /// Insert a torrent row; `save_path` is ignored by the old schema.
        pub fn add_torrent(&self, info_hash: &str, name: &str, save_path: Option<&str>) {
            let has_save_path = self
                .conn
                .prepare("SELECT save_path FROM client_searchee LIMIT 0")
                .is_ok();
            if has_save_path {
                self.conn
                    .execute(
                        "INSERT INTO client_searchee (info_hash, name, save_path) VALUES (?, ?, ?)",
                        params![info_hash, name, save_path],
                    )
                    .expect("Failed to insert torrent");
            } else {
                self.conn
                    .execute(
                        "INSERT INTO client_searchee (info_hash, name) VALUES (?, ?)",
                        params![info_hash, name],
                    )
                    .expect("Failed to insert torrent");
            }
        }

        /// Insert a decision with `last_seen` in epoch milliseconds.
        pub fn add_decision(&self, info_hash: &str, guid: &str, decision: &str, last_seen: i64) {
            self.conn
                .execute(
                    "INSERT INTO decision (guid, info_hash, decision, last_seen) VALUES (?, ?, ?, ?)",
                    params![guid, info_hash, decision, last_seen],
                )
                .expect("Failed to insert decision");
        }
    }

    impl Default for CrossSeedFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Build a match record without touching a database.
    pub fn match_record(
        torrent_id: &str,
        file_path: &str,
        tracker_raw: &str,
        status: &str,
        observed_ms: i64,
    ) -> MatchRecord {
        MatchRecord {
            torrent_id: torrent_id.to_string(),
            file_path: file_path.to_string(),
            tracker_raw: tracker_raw.to_string(),
            status: MatchStatus::from(status),
            observed_at: chrono::DateTime::from_timestamp_millis(observed_ms),
        }
    }
}
