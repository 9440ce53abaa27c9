//! Line-level diff between two version contents.
//!
//! [`diff_lines`] turns a baseline and a candidate text into an ordered list
//! of [`DiffRow`]s with stable 1-based line numbers on each side. The diff is
//! computed with the `similar` crate's Myers algorithm over the split lines,
//! which yields a minimal edit script (its kept lines form a longest common
//! subsequence).

use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffOp};

// ---------------------------------------------------------------------------
// Row kind
// ---------------------------------------------------------------------------

/// The kind of a single row in a line diff.
///
/// - `Context` -- line present on both sides.
/// - `Added`   -- line present only in the candidate.
/// - `Removed` -- line present only in the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffRowKind {
    Context,
    Added,
    Removed,
}

impl DiffRowKind {
    /// String representation for display, logging, and JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }

    /// Single-character gutter marker used by text renderers.
    pub fn marker(&self) -> char {
        match self {
            Self::Context => ' ',
            Self::Added => '+',
            Self::Removed => '-',
        }
    }
}

impl std::fmt::Display for DiffRowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One render-ready line of a diff.
///
/// `old_line_number` is set for context and removed rows, `new_line_number`
/// for context and added rows. Both are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRow {
    pub kind: DiffRowKind,
    pub old_line_number: Option<usize>,
    pub new_line_number: Option<usize>,
    pub text: String,
}

impl DiffRow {
    fn context(old_line: usize, new_line: usize, text: &str) -> Self {
        Self {
            kind: DiffRowKind::Context,
            old_line_number: Some(old_line),
            new_line_number: Some(new_line),
            text: text.to_string(),
        }
    }

    fn removed(old_line: usize, text: &str) -> Self {
        Self {
            kind: DiffRowKind::Removed,
            old_line_number: Some(old_line),
            new_line_number: None,
            text: text.to_string(),
        }
    }

    fn added(new_line: usize, text: &str) -> Self {
        Self {
            kind: DiffRowKind::Added,
            old_line_number: None,
            new_line_number: Some(new_line),
            text: text.to_string(),
        }
    }

    pub fn is_context(&self) -> bool {
        self.kind == DiffRowKind::Context
    }

    pub fn is_added(&self) -> bool {
        self.kind == DiffRowKind::Added
    }

    pub fn is_removed(&self) -> bool {
        self.kind == DiffRowKind::Removed
    }
}

/// Added/removed/unchanged line counts for a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    /// Tally the rows of an already computed diff.
    pub fn from_rows(rows: &[DiffRow]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            match row.kind {
                DiffRowKind::Context => acc.unchanged += 1,
                DiffRowKind::Added => acc.added += 1,
                DiffRowKind::Removed => acc.removed += 1,
            }
            acc
        })
    }

    /// `true` when both sides hold the same lines.
    pub fn is_identical(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

// ---------------------------------------------------------------------------
// Line splitting
// ---------------------------------------------------------------------------

/// Split text into lines on `\n`.
///
/// The empty string has no lines, and a single trailing terminator does not
/// start an extra empty line. Carriage returns stay part of the line text.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n').collect()
}

// ---------------------------------------------------------------------------
// Diff computation
// ---------------------------------------------------------------------------

/// Compute the line diff from `baseline` (old side) to `candidate` (new side).
///
/// The edit script is minimal: context rows form a longest common
/// subsequence of the two line lists. Ties between equally short scripts
/// are broken by Myers' forward/backward snake search, which is fixed for
/// given inputs, so the same inputs always produce the same rows. Within a
/// change block every removed row is emitted before the added rows.
pub fn diff_lines(baseline: &str, candidate: &str) -> Vec<DiffRow> {
    let old_lines = split_lines(baseline);
    let new_lines = split_lines(candidate);

    let ops = similar::capture_diff_slices(Algorithm::Myers, &old_lines, &new_lines);

    let mut rows = Vec::with_capacity(old_lines.len().max(new_lines.len()));
    let mut removed = Vec::new();
    let mut added = Vec::new();
    let mut old_line = 1usize;
    let mut new_line = 1usize;

    for op in ops {
        let (old_range, new_range) = (op.old_range(), op.new_range());
        if let DiffOp::Equal { .. } = op {
            flush_block(&mut rows, &mut removed, &mut added);
            for text in &old_lines[old_range] {
                rows.push(DiffRow::context(old_line, new_line, text));
                old_line += 1;
                new_line += 1;
            }
            continue;
        }
        for text in &old_lines[old_range] {
            removed.push(DiffRow::removed(old_line, text));
            old_line += 1;
        }
        for text in &new_lines[new_range] {
            added.push(DiffRow::added(new_line, text));
            new_line += 1;
        }
    }
    flush_block(&mut rows, &mut removed, &mut added);

    rows
}

/// Append a pending change block: removed rows first, then added rows.
fn flush_block(rows: &mut Vec<DiffRow>, removed: &mut Vec<DiffRow>, added: &mut Vec<DiffRow>) {
    rows.append(removed);
    rows.append(added);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
