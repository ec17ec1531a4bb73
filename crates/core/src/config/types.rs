use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::tracker::TrackerTable;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub trackers: TrackersConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("/cross-seed/cross-seed.db")
}

/// Tracker universe and mapping configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrackersConfig {
    /// Trackers to report coverage against, in display order.
    /// Codes or any accepted spelling.
    #[serde(default)]
    pub universe: Vec<String>,
    /// Use every mapped tracker seen in the database when `universe` is empty.
    #[serde(default)]
    pub discover: bool,
    /// Extra spellings per tracker code. Unknown codes add new trackers.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
    /// Upload rules per tracker, consumed by the external validator.
    #[serde(default)]
    pub rules: BTreeMap<String, TrackerRules>,
}

impl TrackersConfig {
    /// Built-in tracker table extended with the configured aliases.
    pub fn table(&self) -> TrackerTable {
        TrackerTable::builtin().with_aliases(&self.aliases)
    }
}

/// Per-tracker upload rules.
///
/// Nothing in the analysis reads these; they are validated and passed
/// through so the upload side sees one config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackerRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_codecs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forbidden_filename_substrings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_resolutions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_duration_secs: Option<u64>,
}

/// Decision classification options
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Treat `INFO_HASH_ALREADY_EXISTS` as found.
    #[serde(default)]
    pub count_existing_info_hash: bool,
}

/// Upload command generation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Command line that starts the upload tool (e.g. "python3 upload.py").
    #[serde(default = "default_upload_command")]
    pub command: String,
    /// Flag that takes the comma-separated tracker list.
    #[serde(default = "default_tracker_flag")]
    pub tracker_flag: String,
    /// Default file name for `--output` without a value.
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            command: default_upload_command(),
            tracker_flag: default_tracker_flag(),
            output_file: default_output_file(),
        }
    }
}

fn default_upload_command() -> String {
    "python3 upload.py".to_string()
}

fn default_tracker_flag() -> String {
    "--trackers".to_string()
}

fn default_output_file() -> PathBuf {
    PathBuf::from("upload_commands.sh")
}
