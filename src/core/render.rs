//! Report rendering
//!
//! Turns a finished `Report` into the textual report: a header naming the
//! pattern and totals, then one delimited section per file. Term-only output
//! headed for stdout degrades to bare terms so it can feed a pipe.

use std::time::Duration;

use crate::core::model::{Intent, PerFileResult, Report};

const DELIMITER: &str = "\n*********************************************************************************************\n";

/// Anchor regex matched by the header line; handed to the pager as the
/// initial-position hint.
pub const HEADER_ANCHOR: &str = r"^\*\*\* Searched for .*$";

fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// `H hit(s)[ in L line(s)]`, the line count elided when every matching line
/// had exactly one hit.
fn counts(hits: usize, lines: usize) -> String {
    if hits == lines {
        pluralize(hits, "hit")
    } else {
        format!("{} in {}", pluralize(hits, "hit"), pluralize(lines, "line"))
    }
}

fn elapsed_label(elapsed: Duration) -> String {
    format!("({:.2} s)", elapsed.as_secs_f64())
}

fn file_section(out: &mut String, file: &PerFileResult) {
    out.push_str(DELIMITER);
    let dir_label = if file.dir.is_empty() {
        String::new()
    } else {
        format!(" [{}/]", file.dir)
    };
    out.push_str(&format!(
        "*** {}{}: {}\n\n",
        file.name,
        dir_label,
        counts(file.hits, file.lines.len())
    ));
    for line in &file.lines {
        out.push_str(line);
        out.push('\n');
    }
}

/// Render the full report for `intent`.
pub fn format_report(report: &Report, intent: &Intent) -> String {
    if intent.simple_output() {
        let mut out = String::new();
        for file in &report.files {
            for term in &file.lines {
                out.push_str(term);
                out.push('\n');
            }
        }
        return out;
    }

    let mut out = format!(
        "*** Searched for '{}': {} {}\n",
        intent.pattern,
        counts(report.total_hits, report.total_lines),
        elapsed_label(report.elapsed)
    );
    for file in &report.files {
        file_section(&mut out, file);
    }
    out
}
