//! Deduplication of match records by torrent identity.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{Aggregation, TorrentEntry};
use crate::config::AnalysisConfig;
use crate::database::{MatchRecord, MatchStatus};
use crate::tracker::{site_of, CanonicalTracker, TrackerTable};

/// Latest decision seen for one raw tracker identifier.
#[derive(Debug, Clone)]
struct LatestDecision {
    tracker: CanonicalTracker,
    status: MatchStatus,
    observed_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct PendingEntry {
    file_path: String,
    latest: HashMap<String, LatestDecision>,
}

/// Single-pass aggregator over match records.
///
/// Records can arrive in any order: for each torrent and raw tracker
/// identifier only the most recent decision is kept, and equal timestamps
/// resolve the same way regardless of which record came first.
pub struct Aggregator<'a> {
    table: &'a TrackerTable,
    count_existing_info_hash: bool,
    pending: HashMap<String, PendingEntry>,
    unmapped: BTreeSet<String>,
    records_seen: usize,
}

impl<'a> Aggregator<'a> {
    pub fn new(table: &'a TrackerTable, options: &AnalysisConfig) -> Self {
        Self {
            table,
            count_existing_info_hash: options.count_existing_info_hash,
            pending: HashMap::new(),
            unmapped: BTreeSet::new(),
            records_seen: 0,
        }
    }

    /// Fold one record into the aggregate.
    pub fn observe(&mut self, record: MatchRecord) {
        self.records_seen += 1;

        let Some(tracker) = self.table.normalize(&record.tracker_raw) else {
            let site = site_of(&record.tracker_raw);
            if self.unmapped.insert(site.to_string()) {
                debug!(tracker = %site, "Unmapped tracker observed");
            }
            return;
        };

        let torrent_id = record.torrent_id.trim().to_ascii_lowercase();
        let count_existing = self.count_existing_info_hash;
        let entry = self
            .pending
            .entry(torrent_id)
            .or_insert_with(|| PendingEntry {
                file_path: record.file_path,
                latest: HashMap::new(),
            });

        let candidate = LatestDecision {
            tracker,
            status: record.status,
            observed_at: record.observed_at,
        };
        match entry.latest.entry(record.tracker_raw) {
            Entry::Occupied(mut slot) => {
                if compare(&candidate, slot.get(), count_existing) == Ordering::Greater {
                    slot.insert(candidate);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
        }
    }

    /// Collapse per-identifier decisions into one entry per torrent.
    pub fn finish(self) -> Aggregation {
        let count_existing = self.count_existing_info_hash;
        let entries: HashMap<String, TorrentEntry> = self
            .pending
            .into_iter()
            .map(|(torrent_id, pending)| {
                let mut found_on = BTreeSet::new();
                let mut best: BTreeMap<CanonicalTracker, LatestDecision> = BTreeMap::new();

                for decision in pending.latest.into_values() {
                    if decision.status.is_found(count_existing) {
                        found_on.insert(decision.tracker.clone());
                    }
                    match best.get(&decision.tracker) {
                        Some(current)
                            if compare_status(&decision.status, &current.status, count_existing)
                                != Ordering::Greater => {}
                        _ => {
                            best.insert(decision.tracker.clone(), decision);
                        }
                    }
                }

                let entry = TorrentEntry {
                    torrent_id: torrent_id.clone(),
                    file_path: pending.file_path,
                    found_on,
                    missing_from: BTreeSet::new(),
                    decisions: best
                        .into_iter()
                        .map(|(tracker, decision)| (tracker, decision.status))
                        .collect(),
                };
                (torrent_id, entry)
            })
            .collect();

        if !self.unmapped.is_empty() {
            info!(
                count = self.unmapped.len(),
                sites = %self.unmapped.iter().cloned().collect::<Vec<_>>().join(", "),
                "Ignored decisions from unmapped trackers"
            );
        }
        debug!(
            records = self.records_seen,
            torrents = entries.len(),
            "Aggregated match records"
        );

        Aggregation {
            entries,
            unmapped: self.unmapped,
            records_seen: self.records_seen,
        }
    }
}

/// Newer decisions win; equal timestamps fall back to the status ordering.
fn compare(a: &LatestDecision, b: &LatestDecision, count_existing: bool) -> Ordering {
    a.observed_at
        .cmp(&b.observed_at)
        .then_with(|| compare_status(&a.status, &b.status, count_existing))
}

/// Found outranks not found, then plain text order so ties are deterministic.
fn compare_status(a: &MatchStatus, b: &MatchStatus, count_existing: bool) -> Ordering {
    a.is_found(count_existing)
        .cmp(&b.is_found(count_existing))
        .then_with(|| b.as_str().cmp(a.as_str()))
}

/// Aggregate a complete record sequence.
pub fn aggregate(
    records: impl IntoIterator<Item = MatchRecord>,
    table: &TrackerTable,
    options: &AnalysisConfig,
) -> Aggregation {
    let mut aggregator = Aggregator::new(table, options);
    for record in records {
        aggregator.observe(record);
    }
    aggregator.finish()
}
