//! Missing-set calculation against the tracker universe.

use super::{AnalysisError, TorrentEntries, TrackerUniverse};

/// Derive `missing_from` for every entry and drop fully covered torrents.
///
/// `found_on` is narrowed to the universe so that the two sets partition it.
pub fn compute_missing(
    entries: TorrentEntries,
    universe: &TrackerUniverse,
) -> Result<TorrentEntries, AnalysisError> {
    if universe.is_empty() {
        return Err(AnalysisError::NoConfiguredTrackers);
    }

    let wanted = universe.to_set();
    let retained = entries
        .into_iter()
        .filter_map(|(torrent_id, mut entry)| {
            entry.found_on.retain(|tracker| wanted.contains(tracker));
            entry.missing_from = wanted.difference(&entry.found_on).cloned().collect();
            (!entry.missing_from.is_empty()).then_some((torrent_id, entry))
        })
        .collect();

    Ok(retained)
}
