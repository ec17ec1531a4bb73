//! Machine-readable report.

use serde::Serialize;

use super::ReportError;
use crate::analysis::{AnalysisReport, TorrentEntry};
use crate::tracker::CanonicalTracker;

#[derive(Serialize)]
struct JsonReport<'a> {
    universe: Vec<&'a CanonicalTracker>,
    torrents_analyzed: usize,
    torrents_in_database: u64,
    torrents_missing: usize,
    missing_counts: Vec<TrackerCount>,
    unmapped_trackers: Vec<&'a str>,
    entries: &'a [TorrentEntry],
}

#[derive(Serialize)]
struct TrackerCount {
    tracker: CanonicalTracker,
    missing: usize,
}

/// Pretty-printed JSON with the same content as the console report.
pub fn render_json(report: &AnalysisReport) -> Result<String, ReportError> {
    let view = JsonReport {
        universe: report.universe.iter().collect(),
        torrents_analyzed: report.torrents_analyzed,
        torrents_in_database: report.torrents_in_database,
        torrents_missing: report.entries.len(),
        missing_counts: report
            .missing_counts()
            .into_iter()
            .map(|(tracker, missing)| TrackerCount { tracker, missing })
            .collect(),
        unmapped_trackers: report.unmapped_trackers.iter().map(String::as_str).collect(),
        entries: &report.entries,
    };
    let mut text = serde_json::to_string_pretty(&view)?;
    text.push('\n');
    Ok(text)
}
