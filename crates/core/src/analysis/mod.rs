//! Missing-tracker analysis.
//!
//! Records flow through three steps: [`aggregate`] folds decisions into one
//! entry per torrent, [`compute_missing`] subtracts each entry's coverage from
//! the tracker universe, and [`AnalysisReport`] orders what is left for the
//! renderers.

mod aggregate;
mod missing;
mod types;

pub use aggregate::{aggregate, Aggregator};
pub use missing::compute_missing;
pub use types::*;

use tracing::{debug, info, warn};

use crate::config::{Config, TrackersConfig};
use crate::database::CrossSeedDatabase;
use crate::tracker::TrackerTable;

/// Run the full analysis against the configured database.
///
/// The database is opened read-only and closed before this returns. An empty
/// universe is not an error here: the report comes back with no trackers and
/// no entries so the caller can explain that nothing was compared.
pub fn run_analysis(config: &Config) -> Result<AnalysisReport, AnalysisError> {
    let table = config.trackers.table();
    let db = CrossSeedDatabase::open(&config.database.path)?;
    analyze(&db, config, &table)
}

/// Analyze an already opened database.
pub fn analyze(
    db: &CrossSeedDatabase,
    config: &Config,
    table: &TrackerTable,
) -> Result<AnalysisReport, AnalysisError> {
    let universe = resolve_universe(db, &config.trackers, table)?;
    debug!(trackers = universe.len(), "Resolved tracker universe");

    let mut aggregator = Aggregator::new(table, &config.analysis);
    db.visit_records(|record| aggregator.observe(record))?;
    let aggregation = aggregator.finish();
    let torrents_analyzed = aggregation.entries.len();
    let torrents_in_database = db.torrent_count()?;

    let retained = match compute_missing(aggregation.entries, &universe) {
        Ok(retained) => retained,
        Err(AnalysisError::NoConfiguredTrackers) => {
            warn!("No configured trackers, nothing to compare against");
            TorrentEntries::new()
        }
        Err(e) => return Err(e),
    };

    info!(
        records = aggregation.records_seen,
        analyzed = torrents_analyzed,
        total = torrents_in_database,
        retained = retained.len(),
        "Missing-tracker analysis complete"
    );

    let mut report = AnalysisReport::new(
        universe,
        retained,
        torrents_analyzed,
        aggregation.unmapped,
    );
    report.torrents_in_database = torrents_in_database;
    Ok(report)
}

/// Configured universe, or the trackers seen in the database when discovery
/// is enabled and nothing is configured.
fn resolve_universe(
    db: &CrossSeedDatabase,
    trackers: &TrackersConfig,
    table: &TrackerTable,
) -> Result<TrackerUniverse, AnalysisError> {
    let universe = TrackerUniverse::resolve(&trackers.universe, table);
    if universe.is_empty() && trackers.discover {
        let observed = db.observed_trackers(table)?;
        info!(count = observed.len(), "Discovered trackers from database");
        return Ok(TrackerUniverse::new(observed));
    }
    Ok(universe)
}
