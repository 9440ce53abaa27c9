//! Core of the prompt version manager.
//!
//! Line-level diffing between two version contents, the selection reducer
//! that picks a comparison baseline, and the per-prompt workspace that ties
//! them together. No I/O lives here; hosts feed snapshots in and render the
//! values that come back out.

pub mod diff;
pub mod error;
pub mod recent;
pub mod selection;
pub mod types;
pub mod version;
pub mod workspace;
