//! Record loader for the cross-seed decision database.
//!
//! cross-seed owns this database; we only ever open it read-only and walk
//! its `decision` rows joined with the torrents they were made for.

mod sqlite;
mod types;

pub use sqlite::CrossSeedDatabase;
pub use types::*;

use std::path::Path;

/// Open the database at `path` and read every match record.
pub fn load_records(path: &Path) -> Result<Vec<MatchRecord>, DatabaseError> {
    CrossSeedDatabase::open(path)?.load_records()
}
