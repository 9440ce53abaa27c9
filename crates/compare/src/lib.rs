//! `promptver-compare` library crate.
//!
//! Command-line definition, input loading and rendering for the compare
//! host. The binary entrypoint lives in `main.rs`.

pub mod config;
pub mod error;
pub mod render;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use promptver_core::diff::{diff_lines, DiffSummary};
use promptver_core::error::CoreError;
use promptver_core::types::DbId;
use promptver_core::version::{sort_newest_first, PromptVersion};
use promptver_core::workspace::PromptWorkspace;

use config::CompareConfig;
use error::CompareError;

/// Print the line diff between two prompt versions.
#[derive(Debug, Parser)]
#[command(name = "promptver-compare", version, about = "Print the line diff between two prompt versions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Diff two text files
    Files {
        /// Older side of the diff
        baseline: PathBuf,
        /// Newer side of the diff
        candidate: PathBuf,
    },
    /// Load a version snapshot and compare through the selection workspace
    Versions {
        /// JSON array of versions of a single prompt
        snapshot: PathBuf,
        /// Version id to select (default: newest)
        selected: Option<DbId>,
        /// Version id to compare against (default: next older)
        compare: Option<DbId>,
    },
}

/// Read a text input, refusing files above the configured size.
pub fn read_input(path: &Path, max_bytes: u64) -> Result<String, CompareError> {
    let io_err = |source| CompareError::Io {
        path: path.to_path_buf(),
        source,
    };
    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > max_bytes {
        return Err(CompareError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: max_bytes,
        });
    }
    std::fs::read_to_string(path).map_err(io_err)
}

/// Load a JSON array of one prompt's versions, ordered newest-first.
///
/// A snapshot mixing prompt names is a [`CoreError::Conflict`].
pub fn load_snapshot(path: &Path, max_bytes: u64) -> Result<Vec<PromptVersion>, CompareError> {
    let raw = read_input(path, max_bytes)?;
    let mut versions: Vec<PromptVersion> =
        serde_json::from_str(&raw).map_err(|source| CompareError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
    if let Some(first) = versions.first() {
        if let Some(other) = versions.iter().find(|v| v.prompt_name != first.prompt_name) {
            return Err(CoreError::Conflict(format!(
                "Snapshot mixes prompts '{}' and '{}'",
                first.prompt_name, other.prompt_name
            ))
            .into());
        }
    }
    sort_newest_first(&mut versions);
    Ok(versions)
}

/// Execute a command and return the rendered output.
pub fn run(command: &Command, config: &CompareConfig) -> Result<String, CompareError> {
    match command {
        Command::Files {
            baseline,
            candidate,
        } => {
            let old = read_input(baseline, config.max_input_bytes)?;
            let new = read_input(candidate, config.max_input_bytes)?;
            let rows = diff_lines(&old, &new);
            let summary = DiffSummary::from_rows(&rows);
            tracing::info!(
                baseline = %baseline.display(),
                candidate = %candidate.display(),
                added = summary.added,
                removed = summary.removed,
                "Compared files"
            );
            let mut out = render::render_rows(&rows, config.show_context);
            out.push_str(&render::render_summary(&summary));
            out.push('\n');
            Ok(out)
        }
        Command::Versions {
            snapshot,
            selected,
            compare,
        } => {
            let versions = load_snapshot(snapshot, config.max_input_bytes)?;
            let prompt_name = versions
                .first()
                .map(|v| v.prompt_name.clone())
                .unwrap_or_default();
            tracing::info!(
                prompt = %prompt_name,
                count = versions.len(),
                "Loaded version snapshot"
            );

            let mut workspace = PromptWorkspace::load(prompt_name, versions);
            if let Some(id) = selected {
                workspace.select(*id);
            }
            if let Some(id) = compare {
                workspace.override_compare(*id);
            }
            Ok(render::render_comparison(
                &workspace.comparison(),
                config.show_context,
            ))
        }
    }
}
