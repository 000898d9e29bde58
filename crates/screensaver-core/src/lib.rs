//! # screensaver-core
//!
//! Settings persistence and validation for the Space Screensaver, plus the
//! editor session a presentation layer uses to edit those settings.
//!
//! This crate has no dependency on any UI toolkit.  A GUI (or the headless
//! command-line front end in `screensaver-settings`) talks to it through the
//! [`SettingsView`] trait and the [`EditorSession`] mediator.
//!
//! # Architecture overview (for beginners)
//!
//! The screensaver shows photos from a set of directories.  The user picks
//! those directories, a list of subdirectories to skip, whether only
//! high-resolution photos are shown, and how long each photo stays on screen.
//! Those four values form one *record* that lives in `settings.json`.
//!
//! - **`domain`** – The typed [`Settings`] record, its defaults, per-field
//!   validators, and the structural "shape" check used to reconcile a file
//!   loaded from disk against the default schema.  Pure logic, no I/O.
//!
//! - **`store`** – [`ConfigStore`], the single source of truth on disk:
//!   open / load / save / reset / get / set, with atomic writes and
//!   self-healing of stale files.
//!
//! - **`session`** – [`EditorSession`], which copies the record into a view,
//!   detects unsaved edits, and commits them back through the store.

pub mod domain;
pub mod session;
pub mod store;

// Re-export the most-used types at the crate root so callers can write
// `screensaver_core::ConfigStore` instead of the full module path.
pub use domain::settings::{FieldError, SettingKey, Settings};
pub use domain::shape::{reconcile, similar_structure, ReconcileReport};
pub use session::editor::{CloseDecision, EditorSession, SettingsView};
pub use store::config_store::{ConfigError, ConfigStore, CorruptPolicy, StoreOptions};
pub use store::location::{default_config_dir, settings_file_in, SETTINGS_FILE_NAME};
