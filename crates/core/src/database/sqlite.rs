//! Read-only access to the cross-seed SQLite database.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, warn};

use super::{DatabaseError, MatchRecord, MatchStatus};
use crate::tracker::{CanonicalTracker, TrackerTable};

const SEARCHEE_TABLE: &str = "client_searchee";
const DECISION_TABLE: &str = "decision";
const SEARCHEE_COLUMNS: &[&str] = &["info_hash", "name"];
const DECISION_COLUMNS: &[&str] = &["info_hash", "guid", "decision", "last_seen"];

/// Read-only handle on a cross-seed database.
///
/// The connection is closed when the handle is dropped, including on early
/// returns from a failed read.
pub struct CrossSeedDatabase {
    conn: Connection,
    path: PathBuf,
    has_save_path: bool,
}

impl CrossSeedDatabase {
    /// Open the database read-only and check that the expected tables exist.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if !path.exists() {
            return Err(DatabaseError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| unreadable(path, e))?;

        let searchee = table_columns(&conn, SEARCHEE_TABLE).map_err(|e| unreadable(path, e))?;
        require_columns(path, SEARCHEE_TABLE, &searchee, SEARCHEE_COLUMNS)?;
        let decision = table_columns(&conn, DECISION_TABLE).map_err(|e| unreadable(path, e))?;
        require_columns(path, DECISION_TABLE, &decision, DECISION_COLUMNS)?;

        let has_save_path = searchee.contains("save_path");
        debug!(path = %path.display(), has_save_path, "Opened cross-seed database");

        Ok(Self {
            conn,
            path: path.to_path_buf(),
            has_save_path,
        })
    }

    /// Stream every decision joined with its torrent, in storage order.
    ///
    /// Rows without an info hash, name or guid are skipped. Any read error
    /// aborts the whole walk. Returns the number of records visited.
    pub fn visit_records<F>(&self, mut visit: F) -> Result<usize, DatabaseError>
    where
        F: FnMut(MatchRecord),
    {
        let save_path = if self.has_save_path {
            "cs.save_path"
        } else {
            "NULL"
        };
        let sql = format!(
            "SELECT cs.info_hash, cs.name, {save_path}, d.guid, d.decision, d.last_seen
             FROM {SEARCHEE_TABLE} cs
             JOIN {DECISION_TABLE} d ON cs.info_hash = d.info_hash"
        );

        let mut stmt = self.conn.prepare(&sql).map_err(|e| self.unreadable(e))?;
        let mut rows = stmt.query([]).map_err(|e| self.unreadable(e))?;

        let mut visited = 0;
        let mut skipped = 0;
        while let Some(row) = rows.next().map_err(|e| self.unreadable(e))? {
            match Self::row_to_record(row).map_err(|e| self.unreadable(e))? {
                Some(record) => {
                    visit(record);
                    visited += 1;
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, "Skipped decision rows with missing torrent or tracker fields");
        }
        debug!(visited, "Read decision records");
        Ok(visited)
    }

    /// Read every record into memory.
    pub fn load_records(&self) -> Result<Vec<MatchRecord>, DatabaseError> {
        let mut records = Vec::new();
        self.visit_records(|record| records.push(record))?;
        Ok(records)
    }

    /// Canonical trackers that appear anywhere in the decision table.
    pub fn observed_trackers(
        &self,
        table: &TrackerTable,
    ) -> Result<BTreeSet<CanonicalTracker>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT DISTINCT guid FROM {DECISION_TABLE} WHERE guid IS NOT NULL"
            ))
            .map_err(|e| self.unreadable(e))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| self.unreadable(e))?;

        let mut trackers = BTreeSet::new();
        for row in rows {
            let guid = row.map_err(|e| self.unreadable(e))?;
            if let Some(tracker) = table.normalize(&guid) {
                trackers.insert(tracker);
            }
        }
        Ok(trackers)
    }

    /// Number of distinct torrents known to the database.
    pub fn torrent_count(&self) -> Result<u64, DatabaseError> {
        self.conn
            .query_row(
                &format!("SELECT COUNT(DISTINCT info_hash) FROM {SEARCHEE_TABLE}"),
                [],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count.max(0) as u64)
            .map_err(|e| self.unreadable(e))
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Option<MatchRecord>> {
        let info_hash: Option<String> = row.get(0)?;
        let name: Option<String> = row.get(1)?;
        let save_path: Option<String> = row.get(2)?;
        let guid: Option<String> = row.get(3)?;
        let decision: Option<String> = row.get(4)?;
        let observed_at = parse_last_seen(row.get_ref(5)?);

        let (Some(torrent_id), Some(name), Some(tracker_raw)) = (info_hash, name, guid) else {
            return Ok(None);
        };
        if torrent_id.trim().is_empty() {
            return Ok(None);
        }

        let file_path = match save_path.filter(|p| !p.trim().is_empty()) {
            Some(dir) => Path::new(&dir).join(&name).to_string_lossy().into_owned(),
            None => name,
        };
        let status = decision
            .as_deref()
            .map(MatchStatus::from)
            .unwrap_or_else(|| MatchStatus::Other(String::new()));

        Ok(Some(MatchRecord {
            torrent_id,
            file_path,
            tracker_raw,
            status,
            observed_at,
        }))
    }

    fn unreadable(&self, err: impl ToString) -> DatabaseError {
        unreadable(&self.path, err)
    }
}

fn unreadable(path: &Path, err: impl ToString) -> DatabaseError {
    DatabaseError::Unreadable {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<HashSet<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<HashSet<String>>>()?;
    Ok(columns)
}

fn require_columns(
    path: &Path,
    table: &str,
    present: &HashSet<String>,
    required: &[&str],
) -> Result<(), DatabaseError> {
    if present.is_empty() {
        return Err(unreadable(path, format!("missing table `{table}`")));
    }
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|column| !present.contains(*column))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(unreadable(
            path,
            format!("table `{table}` is missing columns: {}", missing.join(", ")),
        ))
    }
}

/// cross-seed stores `last_seen` as epoch milliseconds; older builds and
/// hand-edited databases sometimes hold RFC 3339 text instead.
fn parse_last_seen(value: ValueRef<'_>) -> Option<DateTime<Utc>> {
    match value {
        ValueRef::Integer(ms) => DateTime::from_timestamp_millis(ms),
        ValueRef::Real(ms) => DateTime::from_timestamp_millis(ms as i64),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).ok()?.trim();
            DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| text.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis))
        }
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}
