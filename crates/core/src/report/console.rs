//! Human-readable console report.

use std::fmt::{self, Write};

use super::{join_trackers, Glyphs};
use crate::analysis::{AnalysisReport, TorrentEntry};

const RULE_WIDTH: usize = 100;
const BANNER_WIDTH: usize = 67;
const DEBUG_LIMIT: usize = 5;

/// Banner, configured trackers, one block per retained torrent and a total.
pub fn render_summary(report: &AnalysisReport, glyphs: &Glyphs) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_summary(&mut out, report, glyphs);
    out
}

/// Decision details for the first few retained torrents.
pub fn render_debug(report: &AnalysisReport, glyphs: &Glyphs) -> String {
    let mut out = String::new();
    let _ = write_debug(&mut out, report, glyphs);
    out
}

/// The boxed program banner.
pub fn render_banner(glyphs: &Glyphs) -> String {
    let frame = glyphs.frame;
    let horizontal: String = std::iter::repeat(frame.horizontal)
        .take(BANNER_WIDTH)
        .collect();
    let mut out = String::new();
    out.push(frame.top_left);
    out.push_str(&horizontal);
    out.push(frame.top_right);
    out.push('\n');
    for line in ["CROSS-POLLINATOR", "Cross-seed Missing Tracker Analyzer"] {
        out.push(frame.vertical);
        out.push_str(&format!("{line:^BANNER_WIDTH$}"));
        out.push(frame.vertical);
        out.push('\n');
    }
    out.push(frame.bottom_left);
    out.push_str(&horizontal);
    out.push(frame.bottom_right);
    out.push('\n');
    out
}

fn write_summary(out: &mut String, report: &AnalysisReport, glyphs: &Glyphs) -> fmt::Result {
    out.push_str(&render_banner(glyphs));

    if !report.has_trackers() {
        writeln!(
            out,
            "{} No configured trackers found, nothing to compare against",
            glyphs.missing
        )?;
        writeln!(out, "{} Total files needing upload: 0", glyphs.stats)?;
        return Ok(());
    }

    let configured = join_trackers(report.universe.iter(), ", ");
    if report.entries.is_empty() {
        writeln!(out, "{} All torrents found on all configured trackers!", glyphs.ok)?;
        writeln!(out, "{} Configured trackers: {configured}", glyphs.target)?;
        return write_coverage(out, report, glyphs);
    }

    writeln!(
        out,
        "{} Found {} unique torrents missing from trackers",
        glyphs.summary,
        report.entries.len()
    )?;
    writeln!(out, "{} Configured trackers: {configured}", glyphs.target)?;
    write_coverage(out, report, glyphs)?;
    writeln!(out)?;
    writeln!(out, "{} MISSING TRACKER REPORT:", glyphs.search)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    for entry in &report.entries {
        write_entry(out, entry, glyphs)?;
    }

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(
        out,
        "{} Total files needing upload: {}",
        glyphs.stats,
        report.entries.len()
    )
}

fn write_coverage(out: &mut String, report: &AnalysisReport, glyphs: &Glyphs) -> fmt::Result {
    writeln!(
        out,
        "{} Searched torrents: {} of {} in the database",
        glyphs.search, report.torrents_analyzed, report.torrents_in_database
    )
}

fn write_entry(out: &mut String, entry: &TorrentEntry, glyphs: &Glyphs) -> fmt::Result {
    writeln!(out, "{} {}", glyphs.file, entry.file_name())?;
    writeln!(out, "   Path: {}", entry.file_path)?;
    writeln!(
        out,
        "   {} Missing: {}",
        glyphs.missing,
        join_trackers(entry.missing_from.iter(), ", ")
    )?;
    writeln!(
        out,
        "   {} Found: {}",
        glyphs.ok,
        found_list(entry)
    )?;
    writeln!(out)
}

fn write_debug(out: &mut String, report: &AnalysisReport, glyphs: &Glyphs) -> fmt::Result {
    writeln!(
        out,
        "{} DEBUG MODE - Showing first {DEBUG_LIMIT} entries with decision details:",
        glyphs.debug
    )?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    for entry in report.entries.iter().take(DEBUG_LIMIT) {
        writeln!(out, "{} DEBUG: {}", glyphs.search, entry.file_name())?;
        writeln!(out, "   Info hash: {}...", short_hash(&entry.torrent_id))?;
        writeln!(out, "   Found on: {}", found_list(entry))?;
        writeln!(
            out,
            "   Missing from: {}",
            join_trackers(entry.missing_from.iter(), ", ")
        )?;
        for (tracker, status) in &entry.decisions {
            let marker = if entry.found_on.contains(tracker) {
                format!("{} FOUND", glyphs.ok)
            } else {
                format!("{} MISSING", glyphs.missing)
            };
            writeln!(out, "   {marker} {tracker}: {status}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn found_list(entry: &TorrentEntry) -> String {
    if entry.found_on.is_empty() {
        "None".to_string()
    } else {
        join_trackers(entry.found_on.iter(), ", ")
    }
}

fn short_hash(hash: &str) -> &str {
    hash.get(..8).unwrap_or(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{report, sample_report};

    #[test]
    fn test_summary_lists_entries() {
        let text = render_summary(&sample_report(), &Glyphs::EMOJI);

        assert!(text.contains("CROSS-POLLINATOR"));
        assert!(text.contains("📊 Found 2 unique torrents missing from trackers"));
        assert!(text.contains("🎯 Configured trackers: AITHER, BLU, HUNO"));
        assert!(text.contains("📁 Alpha.2020.mkv\n   Path: /data/Alpha.2020.mkv\n"));
        assert!(text.contains("   ❌ Missing: BLU\n   ✅ Found: AITHER, HUNO\n"));
        assert!(text.contains("   ❌ Missing: AITHER, BLU, HUNO\n   ✅ Found: None\n"));
        assert!(text.contains("📈 Total files needing upload: 2"));
        assert!(text.contains("🔍 Searched torrents: 2 of 3 in the database"));
    }

    #[test]
    fn test_summary_orders_by_file_name() {
        let text = render_summary(&sample_report(), &Glyphs::PLAIN);
        let alpha = text.find("Alpha.2020.mkv").unwrap();
        let bravo = text.find("bravo.s01").unwrap();
        assert!(alpha < bravo);
    }

    #[test]
    fn test_plain_summary_has_no_emoji() {
        let text = render_summary(&sample_report(), &Glyphs::PLAIN);
        assert!(text.is_ascii());
        assert!(text.contains("[X] Missing: BLU"));
        assert!(text.contains("[#] Found 2 unique torrents"));
    }

    #[test]
    fn test_summary_same_content_in_both_styles() {
        let emoji = render_summary(&sample_report(), &Glyphs::EMOJI);
        let plain = render_summary(&sample_report(), &Glyphs::PLAIN);
        assert_eq!(emoji.lines().count(), plain.lines().count());
    }

    #[test]
    fn test_summary_all_found() {
        let text = render_summary(&report(&["AITHER", "BLU"], Vec::new()), &Glyphs::EMOJI);
        assert!(text.contains("✅ All torrents found on all configured trackers!"));
        assert!(text.contains("🎯 Configured trackers: AITHER, BLU"));
        assert!(text.contains("Searched torrents: 0 of 0 in the database"));
    }

    #[test]
    fn test_summary_no_trackers() {
        let text = render_summary(&report(&[], Vec::new()), &Glyphs::PLAIN);
        assert!(text.contains("No configured trackers found, nothing to compare against"));
        assert!(text.contains("Total files needing upload: 0"));
    }

    #[test]
    fn test_banner_width() {
        for glyphs in [Glyphs::EMOJI, Glyphs::PLAIN] {
            let banner = render_banner(&glyphs);
            for line in banner.lines() {
                assert_eq!(line.chars().count(), BANNER_WIDTH + 2);
            }
        }
    }

    #[test]
    fn test_debug_shows_decisions() {
        let text = render_debug(&sample_report(), &Glyphs::PLAIN);
        assert!(text.contains("[D] DEBUG MODE"));
        assert!(text.contains("Info hash: aaaaaaaa..."));
        assert!(text.contains("[OK] FOUND AITHER: MATCH"));
        assert!(text.contains("[X] MISSING BLU: NO_MATCH"));
    }

    #[test]
    fn test_short_hash() {
        assert_eq!(short_hash("0123456789abcdef"), "01234567");
        assert_eq!(short_hash("abc"), "abc");
    }
}
