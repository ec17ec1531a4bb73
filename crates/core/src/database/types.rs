//! Types for reading the cross-seed decision database.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a local torrent compared against one tracker's search result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchStatus {
    Match,
    MatchSizeOnly,
    MatchPartial,
    NoMatch,
    /// The tracker already serves a torrent with the same info hash.
    InfoHashAlreadyExists,
    /// Any other decision cross-seed records (rate limits, blocked releases...).
    Other(String),
}

impl MatchStatus {
    /// Whether this decision means the content was found on the tracker.
    ///
    /// `InfoHashAlreadyExists` only counts when `count_existing_info_hash`
    /// is set.
    pub fn is_found(&self, count_existing_info_hash: bool) -> bool {
        match self {
            Self::Match | Self::MatchSizeOnly | Self::MatchPartial => true,
            Self::InfoHashAlreadyExists => count_existing_info_hash,
            Self::NoMatch | Self::Other(_) => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Match => "MATCH",
            Self::MatchSizeOnly => "MATCH_SIZE_ONLY",
            Self::MatchPartial => "MATCH_PARTIAL",
            Self::NoMatch => "NO_MATCH",
            Self::InfoHashAlreadyExists => "INFO_HASH_ALREADY_EXISTS",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for MatchStatus {
    fn from(s: &str) -> Self {
        match s.trim() {
            "MATCH" => Self::Match,
            "MATCH_SIZE_ONLY" => Self::MatchSizeOnly,
            "MATCH_PARTIAL" => Self::MatchPartial,
            "NO_MATCH" => Self::NoMatch,
            "INFO_HASH_ALREADY_EXISTS" => Self::InfoHashAlreadyExists,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for MatchStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<MatchStatus> for String {
    fn from(status: MatchStatus) -> Self {
        match status {
            MatchStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for MatchStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decision row joined with the torrent it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Info hash of the local torrent.
    pub torrent_id: String,
    /// Location of the content on disk.
    pub file_path: String,
    /// Tracker identifier exactly as stored (usually a torznab guid).
    pub tracker_raw: String,
    pub status: MatchStatus,
    /// When cross-seed last saw this decision, if the value was readable.
    pub observed_at: Option<DateTime<Utc>>,
}

/// Errors for database access.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Database unreadable: {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
}
