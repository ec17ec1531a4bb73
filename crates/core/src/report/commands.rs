//! Upload-command file generation.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::{join_trackers, ReportError};
use crate::analysis::AnalysisReport;
use crate::config::UploadConfig;

/// How much to put around the command lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandFileMode {
    /// Shebang, header and per-torrent comments.
    #[default]
    Full,
    /// Command lines only.
    Clean,
}

/// Render one upload invocation per retained torrent.
///
/// Each line is `<command> <quoted path> <tracker_flag> <MISSING,...>`.
/// Fails without producing any text if a path cannot be shell-quoted.
pub fn render_upload_commands(
    report: &AnalysisReport,
    upload: &UploadConfig,
    mode: CommandFileMode,
    generated_at: DateTime<Utc>,
) -> Result<String, ReportError> {
    let mut out = String::new();

    if mode == CommandFileMode::Full {
        out.push_str("#!/usr/bin/env bash\n");
        out.push_str(&format!(
            "# Upload commands generated by cross-pollinator on {}\n",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push_str(&format!("# Total torrents: {}\n", report.entries.len()));
        if !report.has_trackers() {
            out.push_str("# No configured trackers, nothing to compare against\n");
        }
    }

    for entry in &report.entries {
        let quoted = quote_path(&entry.file_path)?;

        if mode == CommandFileMode::Full {
            out.push('\n');
            let _ = writeln!(out, "# {}", comment_text(entry.file_name()));
            let _ = writeln!(out, "# Missing: {}", join_trackers(entry.missing_from.iter(), ", "));
            let found = if entry.found_on.is_empty() {
                "None".to_string()
            } else {
                join_trackers(entry.found_on.iter(), ", ")
            };
            let _ = writeln!(out, "# Found: {found}");
        }

        let _ = writeln!(
            out,
            "{} {} {} {}",
            upload.command.trim(),
            quoted,
            upload.tracker_flag.trim(),
            join_trackers(entry.missing_from.iter(), ",")
        );
    }

    Ok(out)
}

/// Shell-quote a path so the command stays on one line.
///
/// Paths with control characters use bash `$'...'` quoting with escapes.
/// NUL cannot be passed in an argument at all.
fn quote_path(path: &str) -> Result<String, ReportError> {
    let unquotable = || ReportError::UnquotablePath {
        path: path.to_string(),
    };
    if path.contains('\0') {
        return Err(unquotable());
    }
    if !path.chars().any(|c| c.is_ascii_control()) {
        return shlex::try_quote(path)
            .map(|quoted| quoted.into_owned())
            .map_err(|_| unquotable());
    }

    let mut out = String::with_capacity(path.len() + 3);
    out.push_str("$'");
    for c in path.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    Ok(out)
}

/// Keep file names from breaking out of a comment line.
fn comment_text(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}
