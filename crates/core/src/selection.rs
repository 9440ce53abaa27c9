//! Comparison-baseline selection for a prompt's version list.
//!
//! [`SelectionState::reduce`] is a pure reducer: given the current state, a
//! snapshot of the version list (newest-first) and a [`SelectionEvent`], it
//! returns the next state. The baseline is chosen with this precedence:
//!
//! 1. keep the current compare target if it is still listed and is not the
//!    selected version;
//! 2. otherwise the version right after the selected one (the next older);
//! 3. otherwise the first listed version that is not the selected one.

use serde::{Deserialize, Serialize};

use crate::types::DbId;
use crate::version::{PromptVersion, VersionSummary};

// ---------------------------------------------------------------------------
// Version identity
// ---------------------------------------------------------------------------

/// Anything in a version list that carries a version id.
pub trait VersionKey {
    fn version_id(&self) -> DbId;
}

impl VersionKey for DbId {
    fn version_id(&self) -> DbId {
        *self
    }
}

impl VersionKey for VersionSummary {
    fn version_id(&self) -> DbId {
        self.id
    }
}

impl VersionKey for PromptVersion {
    fn version_id(&self) -> DbId {
        self.id
    }
}

// ---------------------------------------------------------------------------
// State, events, recoveries
// ---------------------------------------------------------------------------

/// The selected version and its comparison baseline.
///
/// When both are set they differ, and `compare_version_id` always refers to
/// a version of the list the state was last reduced against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_version_id: Option<DbId>,
    pub compare_version_id: Option<DbId>,
}

/// Something that happened to the selection or to the version list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "version_id", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// The list was loaded, or a version was created, updated or deleted.
    VersionsChanged,
    /// The user picked a version to view.
    VersionSelected(DbId),
    /// The user picked the baseline explicitly.
    CompareOverridden(DbId),
    /// The workspace switched to another prompt name.
    Reset,
}

/// A caller-supplied reference the reducer had to discard.
///
/// These are recovered locally and never fail a transition; hosts may log
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Stale reference: version {id} is not in the current list")]
    StaleReference { id: DbId },

    #[error("Version {id} cannot be compared against itself")]
    SelfComparison { id: DbId },
}

/// Result of a single reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: SelectionState,
    pub recovery: Option<SelectionError>,
}

// ---------------------------------------------------------------------------
// Reducer
// ---------------------------------------------------------------------------

impl SelectionState {
    /// `true` when there is a baseline to diff the selection against.
    pub fn has_comparison(&self) -> bool {
        self.selected_version_id.is_some() && self.compare_version_id.is_some()
    }

    /// Compute the next state for `event` against the `versions` snapshot.
    pub fn reduce<V: VersionKey>(self, versions: &[V], event: SelectionEvent) -> Transition {
        let listed = |id: DbId| versions.iter().any(|v| v.version_id() == id);
        let current_selection = self.selected_version_id.filter(|id| listed(*id));
        let mut recovery = None;

        let (selected, compare_hint) = match event {
            SelectionEvent::Reset => {
                return Transition {
                    state: Self::default(),
                    recovery: None,
                }
            }
            SelectionEvent::VersionsChanged => (current_selection, self.compare_version_id),
            SelectionEvent::VersionSelected(id) if listed(id) => {
                (Some(id), self.compare_version_id)
            }
            SelectionEvent::VersionSelected(id) => {
                recovery = Some(SelectionError::StaleReference { id });
                (current_selection, self.compare_version_id)
            }
            SelectionEvent::CompareOverridden(id) if !listed(id) => {
                recovery = Some(SelectionError::StaleReference { id });
                (current_selection, None)
            }
            SelectionEvent::CompareOverridden(id) if current_selection == Some(id) => {
                recovery = Some(SelectionError::SelfComparison { id });
                (current_selection, self.compare_version_id)
            }
            SelectionEvent::CompareOverridden(id) => (current_selection, Some(id)),
        };

        // Without a usable selection, fall back to the newest version.
        let selected = selected.or_else(|| versions.first().map(VersionKey::version_id));
        let compare = selected.and_then(|sel| pick_baseline(versions, sel, compare_hint));

        Transition {
            state: Self {
                selected_version_id: selected,
                compare_version_id: compare,
            },
            recovery,
        }
    }
}

fn pick_baseline<V: VersionKey>(
    versions: &[V],
    selected: DbId,
    current: Option<DbId>,
) -> Option<DbId> {
    let mut candidates = versions
        .iter()
        .map(VersionKey::version_id)
        .filter(|id| *id != selected);

    let first_candidate = candidates.clone().next()?;

    if let Some(current) = current {
        if candidates.any(|id| id == current) {
            return Some(current);
        }
    }

    let next_older = versions
        .iter()
        .position(|v| v.version_id() == selected)
        .and_then(|idx| versions.get(idx + 1))
        .map(VersionKey::version_id)
        .filter(|id| *id != selected);

    Some(next_older.unwrap_or(first_candidate))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
