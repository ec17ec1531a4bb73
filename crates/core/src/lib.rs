pub mod analysis;
pub mod config;
pub mod database;
pub mod report;
pub mod testing;
pub mod tracker;

pub use analysis::{
    aggregate, analyze, compute_missing, run_analysis, AnalysisError, AnalysisReport, TorrentEntry,
    TrackerUniverse,
};
pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config, ConfigError,
};
pub use database::{load_records, CrossSeedDatabase, DatabaseError, MatchRecord, MatchStatus};
pub use report::{
    render_banner, render_debug, render_json, render_stats, render_summary,
    render_upload_commands, write_atomic, CommandFileMode, Glyphs, ReportError,
};
pub use tracker::{normalize, CanonicalTracker, TrackerTable};
