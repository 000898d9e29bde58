//! EditSettingsUseCase: applies user edits to a view and saves when needed.
//!
//! The settings window has six buttons / widgets that change the view:
//! add and remove a photo directory, add and remove an excluded directory,
//! the "only high resolution" checkbox, and the interval spinbox.  Each is one
//! [`ViewEdit`] variant.  [`apply_edit`] performs it against any
//! [`SettingsView`], and [`edit_and_commit`] runs the whole editor contract:
//!
//! 1. `load_into` the view from the session,
//! 2. apply the edits in order,
//! 3. `commit` only if `is_unchanged` reports a difference.
//!
//! Edits only touch the view.  Nothing reaches the disk until the commit.

use std::ops::RangeInclusive;

use screensaver_core::{ConfigError, EditorSession, SettingsView};
use thiserror::Error;
use tracing::debug;

/// Interval values the editor accepts, matching the spinbox bounds.
pub const INTERVAL_RANGE: RangeInclusive<u32> = 1..=9999;

/// Which of the two path lists an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathList {
    Directories,
    Excluded,
}

impl PathList {
    fn label(self) -> &'static str {
        match self {
            PathList::Directories => "directories",
            PathList::Excluded => "excluded directories",
        }
    }
}

/// One user action against the settings view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEdit {
    /// Append a path to a list.
    AddPath { list: PathList, path: String },
    /// Remove the entry at `index` from a list.
    RemovePath { list: PathList, index: usize },
    /// Set the high-resolution filter.
    SetOnlyHighRes(bool),
    /// Flip the high-resolution filter.
    ToggleOnlyHighRes,
    /// Set the slideshow interval in seconds.
    SetInterval(u32),
}

/// Reasons a [`ViewEdit`] is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewEditError {
    #[error("interval must be between {min} and {max} seconds, got {value}")]
    IntervalOutOfRange { value: u32, min: u32, max: u32 },

    #[error("no entry {index} in {list} (list has {len} entries)")]
    NoSuchEntry {
        list: &'static str,
        index: usize,
        len: usize,
    },

    #[error("path must not be empty")]
    EmptyPath,
}

/// Error type for [`edit_and_commit`].
#[derive(Debug, Error)]
pub enum EditSettingsError {
    #[error("edit rejected: {0}")]
    Edit(#[from] ViewEditError),
    #[error("could not save settings: {0}")]
    Store(#[from] ConfigError),
}

/// Whether [`edit_and_commit`] wrote to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Unchanged,
}

/// Applies one edit to `view`.
///
/// On error the view is left unchanged.
///
/// # Errors
///
/// - [`ViewEditError::EmptyPath`] when adding an empty path (a cancelled
///   directory picker).
/// - [`ViewEditError::NoSuchEntry`] when removing past the end of a list
///   (nothing selected).
/// - [`ViewEditError::IntervalOutOfRange`] for an interval outside
///   [`INTERVAL_RANGE`].
pub fn apply_edit<V: SettingsView + ?Sized>(
    view: &mut V,
    edit: &ViewEdit,
) -> Result<(), ViewEditError> {
    match edit {
        ViewEdit::AddPath { list, path } => {
            if path.trim().is_empty() {
                return Err(ViewEditError::EmptyPath);
            }
            let mut entries = read_list(view, *list);
            entries.push(path.clone());
            write_list(view, *list, entries);
        }
        ViewEdit::RemovePath { list, index } => {
            let mut entries = read_list(view, *list);
            if *index >= entries.len() {
                return Err(ViewEditError::NoSuchEntry {
                    list: list.label(),
                    index: *index,
                    len: entries.len(),
                });
            }
            entries.remove(*index);
            write_list(view, *list, entries);
        }
        ViewEdit::SetOnlyHighRes(value) => view.set_only_high_res(*value),
        ViewEdit::ToggleOnlyHighRes => {
            let current = view.only_high_res();
            view.set_only_high_res(!current);
        }
        ViewEdit::SetInterval(seconds) => {
            if !INTERVAL_RANGE.contains(seconds) {
                return Err(ViewEditError::IntervalOutOfRange {
                    value: *seconds,
                    min: *INTERVAL_RANGE.start(),
                    max: *INTERVAL_RANGE.end(),
                });
            }
            view.set_interval_seconds(*seconds);
        }
    }
    Ok(())
}

/// Loads `view` from `session`, applies `edits`, and commits if anything changed.
///
/// Edits are applied in order; the first rejected edit aborts the whole
/// batch before anything is saved.
///
/// # Errors
///
/// Returns [`EditSettingsError::Edit`] for a rejected edit and
/// [`EditSettingsError::Store`] if saving fails.
pub fn edit_and_commit<V: SettingsView + ?Sized>(
    session: &mut EditorSession,
    view: &mut V,
    edits: &[ViewEdit],
) -> Result<SaveOutcome, EditSettingsError> {
    session.load_into(view);
    for edit in edits {
        apply_edit(view, edit)?;
    }

    if session.is_unchanged(&*view) {
        debug!("edits left the settings unchanged; nothing to save");
        return Ok(SaveOutcome::Unchanged);
    }
    session.commit(&*view)?;
    Ok(SaveOutcome::Saved)
}

fn read_list<V: SettingsView + ?Sized>(view: &V, list: PathList) -> Vec<String> {
    match list {
        PathList::Directories => view.directories(),
        PathList::Excluded => view.excluded_directories(),
    }
}

fn write_list<V: SettingsView + ?Sized>(view: &mut V, list: PathList, entries: Vec<String>) {
    match list {
        PathList::Directories => view.set_directories(entries),
        PathList::Excluded => view.set_excluded_directories(entries),
    }
}
