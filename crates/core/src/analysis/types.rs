//! Types for the missing-tracker analysis.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::database::{DatabaseError, MatchStatus};
use crate::tracker::{CanonicalTracker, TrackerTable};

/// The trackers coverage is measured against, in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrackerUniverse(Vec<CanonicalTracker>);

impl TrackerUniverse {
    /// Build from canonical codes; later duplicates are dropped.
    pub fn new(trackers: impl IntoIterator<Item = CanonicalTracker>) -> Self {
        let mut seen = BTreeSet::new();
        Self(
            trackers
                .into_iter()
                .filter(|tracker| seen.insert(tracker.clone()))
                .collect(),
        )
    }

    /// Canonicalise configured spellings. Unknown names are logged and left out.
    pub fn resolve(names: &[String], table: &TrackerTable) -> Self {
        Self::new(names.iter().filter_map(|name| {
            let tracker = table.normalize(name);
            if tracker.is_none() {
                warn!(tracker = %name, "Ignoring unknown tracker in universe");
            }
            tracker
        }))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, tracker: &CanonicalTracker) -> bool {
        self.0.contains(tracker)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalTracker> {
        self.0.iter()
    }

    pub fn to_set(&self) -> BTreeSet<CanonicalTracker> {
        self.0.iter().cloned().collect()
    }
}

/// One local torrent and its tracker coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TorrentEntry {
    /// Lower-cased info hash.
    pub torrent_id: String,
    /// Path of the first record seen for this torrent.
    pub file_path: String,
    pub found_on: BTreeSet<CanonicalTracker>,
    /// Filled in by `compute_missing`.
    pub missing_from: BTreeSet<CanonicalTracker>,
    /// Latest decision per tracker, for the debug view.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub decisions: BTreeMap<CanonicalTracker, MatchStatus>,
}

impl TorrentEntry {
    /// Final path component, or the whole path when it has none.
    pub fn file_name(&self) -> &str {
        Path::new(&self.file_path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file_path)
    }
}

/// Entries keyed by torrent id.
pub type TorrentEntries = HashMap<String, TorrentEntry>;

/// Output of the aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub entries: TorrentEntries,
    /// Sites whose identifiers did not map to any tracker.
    pub unmapped: BTreeSet<String>,
    pub records_seen: usize,
}

/// Finished analysis, ready for rendering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub universe: TrackerUniverse,
    /// Torrents missing from at least one tracker, ordered by file name.
    pub entries: Vec<TorrentEntry>,
    /// Torrents that had at least one mapped decision.
    pub torrents_analyzed: usize,
    /// Distinct torrents in the client table, searched or not.
    pub torrents_in_database: u64,
    pub unmapped_trackers: BTreeSet<String>,
}

impl AnalysisReport {
    pub fn new(
        universe: TrackerUniverse,
        retained: TorrentEntries,
        torrents_analyzed: usize,
        unmapped_trackers: BTreeSet<String>,
    ) -> Self {
        let mut entries: Vec<TorrentEntry> = retained.into_values().collect();
        entries.sort_by(|a, b| {
            a.file_name()
                .to_lowercase()
                .cmp(&b.file_name().to_lowercase())
                .then_with(|| a.torrent_id.cmp(&b.torrent_id))
        });
        Self {
            universe,
            entries,
            torrents_analyzed,
            torrents_in_database: 0,
            unmapped_trackers,
        }
    }

    /// Whether there was anything to compare against.
    pub fn has_trackers(&self) -> bool {
        !self.universe.is_empty()
    }

    /// Retained torrents missing from each universe tracker, most-missing first.
    ///
    /// Ties keep universe order.
    pub fn missing_counts(&self) -> Vec<(CanonicalTracker, usize)> {
        let mut counts: Vec<(CanonicalTracker, usize)> = self
            .universe
            .iter()
            .map(|tracker| {
                let count = self
                    .entries
                    .iter()
                    .filter(|entry| entry.missing_from.contains(tracker))
                    .count();
                (tracker.clone(), count)
            })
            .collect();
        // Stable sort keeps universe order for equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

/// Errors for the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("No configured trackers: nothing to compare against")]
    NoConfiguredTrackers,
}
