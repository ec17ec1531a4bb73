//! Renderers for a finished [`AnalysisReport`](crate::analysis::AnalysisReport).
//!
//! Every renderer returns a `String` so callers can decide where text goes.
//! Only [`write_atomic`] touches the filesystem.

mod commands;
mod console;
mod glyphs;
mod json;
mod stats;
mod writer;

pub use commands::{render_upload_commands, CommandFileMode};
pub use console::{render_banner, render_debug, render_summary};
pub use glyphs::{Frame, Glyphs};
pub use json::render_json;
pub use stats::render_stats;
pub use writer::write_atomic;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::tracker::CanonicalTracker;

/// Errors from rendering or writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path cannot be quoted for a shell command: {path:?}")]
    UnquotablePath { path: String },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn join_trackers<'a>(
    trackers: impl Iterator<Item = &'a CanonicalTracker>,
    separator: &str,
) -> String {
    trackers
        .map(CanonicalTracker::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}
