//! Per-prompt workspace: the version list, the selection, and comparisons.
//!
//! [`PromptWorkspace`] holds the current snapshot for one prompt name. Every
//! change coming from the user or from the external CRUD layer goes through
//! [`SelectionState::reduce`], and [`PromptWorkspace::comparison`] renders
//! the selected version against its baseline with [`diff_lines`].

use serde::Serialize;

use crate::diff::{diff_lines, DiffRow, DiffSummary};
use crate::error::CoreError;
use crate::selection::{SelectionEvent, SelectionState, Transition};
use crate::types::DbId;
use crate::version::{PromptVersion, PromptVersionUpdate, TagUpdate};

// ---------------------------------------------------------------------------
// Comparison view
// ---------------------------------------------------------------------------

/// What the diff view should show for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Comparison {
    /// The workspace has no versions.
    NoSelection,
    /// The selected version is the only one.
    NoComparison { selected_version_id: DbId },
    Available {
        baseline_version_id: DbId,
        baseline_version_number: i32,
        candidate_version_id: DbId,
        candidate_version_number: i32,
        rows: Vec<DiffRow>,
        summary: DiffSummary,
    },
}

// ---------------------------------------------------------------------------
// Workspace
// ---------------------------------------------------------------------------

/// Version list and selection for a single prompt name.
#[derive(Debug, Clone, Default)]
pub struct PromptWorkspace {
    prompt_name: String,
    versions: Vec<PromptVersion>,
    selection: SelectionState,
}

impl PromptWorkspace {
    /// Open a workspace on `prompt_name` with its versions (newest-first).
    pub fn load(prompt_name: impl Into<String>, versions: Vec<PromptVersion>) -> Self {
        let mut workspace = Self {
            prompt_name: prompt_name.into(),
            versions,
            selection: SelectionState::default(),
        };
        workspace.dispatch(SelectionEvent::VersionsChanged);
        workspace
    }

    pub fn prompt_name(&self) -> &str {
        &self.prompt_name
    }

    pub fn versions(&self) -> &[PromptVersion] {
        &self.versions
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn selected(&self) -> Option<&PromptVersion> {
        self.find(self.selection.selected_version_id?)
    }

    pub fn baseline(&self) -> Option<&PromptVersion> {
        self.find(self.selection.compare_version_id?)
    }

    /// Versions the selection can be compared against, in list order.
    pub fn comparison_options(&self) -> Vec<&PromptVersion> {
        match self.selection.selected_version_id {
            Some(selected) => self.versions.iter().filter(|v| v.id != selected).collect(),
            None => Vec::new(),
        }
    }

    /// Versions matching a search query, in list order.
    pub fn filtered(&self, query: &str) -> Vec<&PromptVersion> {
        self.versions
            .iter()
            .filter(|v| v.matches_filter(query))
            .collect()
    }

    // -- user events ----------------------------------------------------------

    pub fn select(&mut self, version_id: DbId) -> SelectionState {
        self.dispatch(SelectionEvent::VersionSelected(version_id))
    }

    pub fn override_compare(&mut self, version_id: DbId) -> SelectionState {
        self.dispatch(SelectionEvent::CompareOverridden(version_id))
    }

    /// Switch to another prompt. The selection starts over from the new list.
    pub fn switch_prompt(&mut self, prompt_name: impl Into<String>, versions: Vec<PromptVersion>) {
        self.prompt_name = prompt_name.into();
        self.dispatch(SelectionEvent::Reset);
        self.versions = versions;
        self.dispatch(SelectionEvent::VersionsChanged);
    }

    // -- CRUD notifications ---------------------------------------------------

    /// A version was created: prepend it and select it.
    pub fn apply_created(&mut self, version: PromptVersion) -> Result<SelectionState, CoreError> {
        if version.prompt_name != self.prompt_name {
            return Err(CoreError::Conflict(format!(
                "Version {} belongs to prompt '{}', not '{}'",
                version.id, version.prompt_name, self.prompt_name
            )));
        }
        if self.find(version.id).is_some() {
            return Err(CoreError::Conflict(format!(
                "Version {} is already in the workspace",
                version.id
            )));
        }
        let id = version.id;
        self.versions.insert(0, version);
        self.dispatch(SelectionEvent::VersionsChanged);
        Ok(self.dispatch(SelectionEvent::VersionSelected(id)))
    }

    /// A version's content or tag changed; its id and position stay put.
    pub fn apply_updated(
        &mut self,
        version_id: DbId,
        update: PromptVersionUpdate,
    ) -> Result<SelectionState, CoreError> {
        update.validate()?;
        let version = self
            .versions
            .iter_mut()
            .find(|v| v.id == version_id)
            .ok_or(CoreError::NotFound {
                entity: "prompt_version",
                id: version_id,
            })?;
        if let Some(content) = update.content {
            version.content = content;
        }
        match update.tag {
            TagUpdate::Keep => {}
            TagUpdate::Set(tag) => version.tag = Some(tag),
            TagUpdate::Clear => version.tag = None,
        }
        version.updated_at = chrono::Utc::now();
        Ok(self.dispatch(SelectionEvent::VersionsChanged))
    }

    /// A version was deleted. Deleting the selection re-selects the newest.
    pub fn apply_deleted(&mut self, version_id: DbId) -> Result<SelectionState, CoreError> {
        let before = self.versions.len();
        self.versions.retain(|v| v.id != version_id);
        if self.versions.len() == before {
            return Err(CoreError::NotFound {
                entity: "prompt_version",
                id: version_id,
            });
        }
        Ok(self.dispatch(SelectionEvent::VersionsChanged))
    }

    // -- rendering ------------------------------------------------------------

    /// Diff of the baseline (old side) against the selection (new side).
    pub fn comparison(&self) -> Comparison {
        let Some(candidate) = self.selected() else {
            return Comparison::NoSelection;
        };
        let Some(baseline) = self.baseline() else {
            return Comparison::NoComparison {
                selected_version_id: candidate.id,
            };
        };
        let rows = diff_lines(&baseline.content, &candidate.content);
        let summary = DiffSummary::from_rows(&rows);
        Comparison::Available {
            baseline_version_id: baseline.id,
            baseline_version_number: baseline.version_number,
            candidate_version_id: candidate.id,
            candidate_version_number: candidate.version_number,
            rows,
            summary,
        }
    }

    // -- internals ------------------------------------------------------------

    fn find(&self, version_id: DbId) -> Option<&PromptVersion> {
        self.versions.iter().find(|v| v.id == version_id)
    }

    fn dispatch(&mut self, event: SelectionEvent) -> SelectionState {
        let Transition { state, recovery } = self.selection.reduce(&self.versions, event);
        if let Some(err) = recovery {
            tracing::warn!(
                prompt = %self.prompt_name,
                event = ?event,
                error = %err,
                "Discarded stale selection reference"
            );
        }
        if state != self.selection {
            tracing::debug!(
                prompt = %self.prompt_name,
                event = ?event,
                selected = ?state.selected_version_id,
                compare = ?state.compare_version_id,
                "Selection recomputed"
            );
        }
        self.selection = state;
        state
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
