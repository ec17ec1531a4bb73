//! Per-tracker upload statistics.

use std::fmt::{self, Write};

use super::Glyphs;
use crate::analysis::AnalysisReport;

/// Table of how many retained torrents each tracker is missing, most first.
pub fn render_stats(report: &AnalysisReport, glyphs: &Glyphs) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_stats(&mut out, report, glyphs);
    out
}

fn write_stats(out: &mut String, report: &AnalysisReport, glyphs: &Glyphs) -> fmt::Result {
    writeln!(out, "{} UPLOAD STATISTICS", glyphs.stats)?;
    writeln!(out, "{}", "-".repeat(50))?;

    if report.entries.is_empty() {
        return writeln!(out, "Nothing to upload.");
    }

    let total = report.entries.len();
    writeln!(out, "Files needing upload per tracker:")?;
    for (tracker, count) in report.missing_counts() {
        let percentage = count as f64 / total as f64 * 100.0;
        let marker = if count * 2 > total {
            glyphs.high
        } else if count > 0 {
            glyphs.medium
        } else {
            glyphs.low
        };
        writeln!(out, "  {marker} {tracker}: {count} files ({percentage:.1}%)")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{entry, report, sample_report};

    #[test]
    fn test_stats_sorted_descending() {
        let text = render_stats(&sample_report(), &Glyphs::EMOJI);
        let lines: Vec<&str> = text.lines().skip(3).collect();

        assert_eq!(
            lines,
            vec![
                "  🔴 BLU: 2 files (100.0%)",
                "  🟡 AITHER: 1 files (50.0%)",
                "  🟡 HUNO: 1 files (50.0%)",
            ]
        );
    }

    #[test]
    fn test_stats_zero_count_is_green() {
        let report = report(
            &["HUNO", "BLU"],
            vec![entry("a", "/a.mkv", &["HUNO"], &["BLU"])],
        );
        let text = render_stats(&report, &Glyphs::PLAIN);

        assert!(text.contains("  [!!] BLU: 1 files (100.0%)"));
        assert!(text.contains("  [ok] HUNO: 0 files (0.0%)"));
        assert!(text.find("BLU").unwrap() < text.find("HUNO").unwrap());
    }

    #[test]
    fn test_stats_ties_keep_universe_order() {
        let report = report(
            &["HUNO", "AITHER", "BLU"],
            vec![entry("a", "/a.mkv", &[], &["HUNO", "AITHER", "BLU"])],
        );
        let text = render_stats(&report, &Glyphs::PLAIN);
        let order: Vec<usize> = ["HUNO:", "AITHER:", "BLU:"]
            .iter()
            .map(|code| text.find(code).unwrap())
            .collect();

        assert!(order[0] < order[1] && order[1] < order[2]);
    }

    #[test]
    fn test_stats_empty_report() {
        let text = render_stats(&report(&["BLU"], Vec::new()), &Glyphs::PLAIN);
        assert!(text.contains("Nothing to upload."));
    }
}
