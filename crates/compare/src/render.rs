//! Plain-text rendering of diff rows and comparisons.

use std::fmt::Write;

use promptver_core::diff::{DiffRow, DiffSummary};
use promptver_core::workspace::Comparison;

/// Printed when the selection has no baseline.
pub const NO_COMPARISON: &str = "no comparison available";

/// Printed when the workspace has no versions at all.
pub const NO_VERSIONS: &str = "no versions";

/// One line per row: gutter marker, old and new line numbers, text.
pub fn render_rows(rows: &[DiffRow], show_context: bool) -> String {
    let mut out = String::new();
    for row in rows.iter().filter(|r| show_context || !r.is_context()) {
        let _ = writeln!(
            out,
            "{} {:>4} {:>4} | {}",
            row.kind.marker(),
            line_number(row.old_line_number),
            line_number(row.new_line_number),
            row.text
        );
    }
    out
}

pub fn render_summary(summary: &DiffSummary) -> String {
    format!("+{} -{}", summary.added, summary.removed)
}

/// Full text view of a workspace comparison.
pub fn render_comparison(comparison: &Comparison, show_context: bool) -> String {
    match comparison {
        Comparison::NoSelection => format!("{NO_VERSIONS}\n"),
        Comparison::NoComparison {
            selected_version_id,
        } => format!("version {selected_version_id}: {NO_COMPARISON}\n"),
        Comparison::Available {
            baseline_version_number,
            candidate_version_number,
            rows,
            summary,
            ..
        } => {
            let mut out = format!("# {baseline_version_number} -> # {candidate_version_number}\n");
            out.push_str(&render_rows(rows, show_context));
            out.push_str(&render_summary(summary));
            out.push('\n');
            out
        }
    }
}

fn line_number(n: Option<usize>) -> String {
    n.map(|n| n.to_string()).unwrap_or_default()
}
