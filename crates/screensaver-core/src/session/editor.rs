//! EditorSession: mediates between a presentation layer and the settings store.
//!
//! A settings window shows four editable widgets (two path lists, a checkbox
//! and a number field).  The session never sees those widgets.  It sees a
//! [`SettingsView`]: four typed getter/setter pairs that the presentation
//! layer implements on top of whatever toolkit it uses.
//!
//! ```text
//! presentation layer                EditorSession               ConfigStore
//!   open window ───────────────────▶ load_into(view) ──────────▶ settings()
//!   user edits widgets (view only)
//!   press Save  ───────────────────▶ commit(view)   ──────────▶ replace + save()
//!   close window ──────────────────▶ close_request(view)
//!                                     └─ is_unchanged(view) ───▶ persisted()
//! ```
//!
//! Because the session depends only on the trait, it can be driven headlessly
//! in tests or by a command-line front end.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::domain::settings::Settings;
use crate::store::config_store::{ConfigError, ConfigStore, StoreOptions};

/// The four editable fields a presentation layer exposes to the session.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsView {
    /// Photo directories, in display order.
    fn directories(&self) -> Vec<String>;
    fn set_directories(&mut self, directories: Vec<String>);

    /// Excluded directories, in display order.
    fn excluded_directories(&self) -> Vec<String>;
    fn set_excluded_directories(&mut self, directories: Vec<String>);

    /// State of the "only high resolution photos" checkbox.
    fn only_high_res(&self) -> bool;
    fn set_only_high_res(&mut self, only_high_res: bool);

    /// Slideshow interval in seconds.
    fn interval_seconds(&self) -> u32;
    fn set_interval_seconds(&mut self, seconds: u32);
}

/// What the presentation layer should do when the user closes the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// Nothing unsaved; close immediately.
    Close,
    /// The view holds unsaved edits; ask before discarding them.
    ConfirmDiscard,
}

/// Holds the store and copies the record to and from a [`SettingsView`].
#[derive(Debug)]
pub struct EditorSession {
    store: ConfigStore,
}

impl EditorSession {
    /// Wraps an already opened store.
    pub fn new(store: ConfigStore) -> Self {
        Self { store }
    }

    /// Opens (or creates) the settings file at `path`.
    ///
    /// # Errors
    ///
    /// See [`ConfigStore::open`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        ConfigStore::open(path).map(Self::new)
    }

    /// Opens (or creates) the settings file at `path` with explicit options.
    ///
    /// # Errors
    ///
    /// See [`ConfigStore::open_with`].
    pub fn open_with(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self, ConfigError> {
        ConfigStore::open_with(path, options).map(Self::new)
    }

    /// The underlying store.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Path of the settings file, for the "open settings folder" action.
    pub fn settings_path(&self) -> &Path {
        self.store.path()
    }

    /// Populates `view` from the current record.
    pub fn load_into<V: SettingsView + ?Sized>(&self, view: &mut V) {
        let settings = self.store.settings();
        view.set_directories(settings.directories.clone());
        view.set_excluded_directories(settings.excluded_directories.clone());
        view.set_only_high_res(settings.only_high_res);
        view.set_interval_seconds(settings.interval_seconds);
    }

    /// Returns `true` if all four view fields equal the last persisted record.
    ///
    /// Lists are compared element by element, in order.
    pub fn is_unchanged<V: SettingsView + ?Sized>(&self, view: &V) -> bool {
        let persisted = self.store.persisted();
        view.directories() == persisted.directories
            && view.excluded_directories() == persisted.excluded_directories
            && view.only_high_res() == persisted.only_high_res
            && view.interval_seconds() == persisted.interval_seconds
    }

    /// Copies the view into the record and writes it to disk.
    ///
    /// # Errors
    ///
    /// See [`ConfigStore::save`].
    pub fn commit<V: SettingsView + ?Sized>(&mut self, view: &V) -> Result<(), ConfigError> {
        self.store.replace(snapshot(view));
        self.store.save()
    }

    /// Decides whether the editor may close without prompting.
    pub fn close_request<V: SettingsView + ?Sized>(&self, view: &V) -> CloseDecision {
        if self.is_unchanged(view) {
            CloseDecision::Close
        } else {
            debug!("close requested with unsaved edits");
            CloseDecision::ConfirmDiscard
        }
    }

    /// Returns one field of the record as JSON.
    ///
    /// # Errors
    ///
    /// See [`ConfigStore::get`].
    pub fn get(&self, key: &str) -> Result<Value, ConfigError> {
        self.store.get(key)
    }

    /// Sets one field of the record from JSON without saving.
    ///
    /// # Errors
    ///
    /// See [`ConfigStore::set`].
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        self.store.set(key, value)
    }

    /// Restores and persists the defaults.
    ///
    /// # Errors
    ///
    /// See [`ConfigStore::reset`].
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.store.reset()
    }

    /// Restores the defaults, then repopulates `view` from them.
    ///
    /// # Errors
    ///
    /// See [`ConfigStore::reset`].
    pub fn reset_into<V: SettingsView + ?Sized>(&mut self, view: &mut V) -> Result<(), ConfigError> {
        self.store.reset()?;
        self.load_into(view);
        Ok(())
    }
}

/// Reads all four fields of a view into a record.
fn snapshot<V: SettingsView + ?Sized>(view: &V) -> Settings {
    Settings {
        directories: view.directories(),
        excluded_directories: view.excluded_directories(),
        only_high_res: view.only_high_res(),
        interval_seconds: view.interval_seconds(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    /// Plain in-memory view for tests that mutate fields after loading.
    #[derive(Debug, Default, Clone)]
    struct FakeView {
        directories: Vec<String>,
        excluded: Vec<String>,
        only_high_res: bool,
        interval: u32,
    }

    impl SettingsView for FakeView {
        fn directories(&self) -> Vec<String> {
            self.directories.clone()
        }
        fn set_directories(&mut self, directories: Vec<String>) {
            self.directories = directories;
        }
        fn excluded_directories(&self) -> Vec<String> {
            self.excluded.clone()
        }
        fn set_excluded_directories(&mut self, directories: Vec<String>) {
            self.excluded = directories;
        }
        fn only_high_res(&self) -> bool {
            self.only_high_res
        }
        fn set_only_high_res(&mut self, only_high_res: bool) {
            self.only_high_res = only_high_res;
        }
        fn interval_seconds(&self) -> u32 {
            self.interval
        }
        fn set_interval_seconds(&mut self, seconds: u32) {
            self.interval = seconds;
        }
    }

    fn make_session() -> (TempDir, EditorSession) {
        let dir = tempdir().unwrap();
        let session = EditorSession::open(dir.path().join("settings.json")).unwrap();
        (dir, session)
    }

    fn loaded_view(session: &EditorSession) -> FakeView {
        let mut view = FakeView::default();
        session.load_into(&mut view);
        view
    }

    // ── load_into ─────────────────────────────────────────────────────────────

    #[test]
    fn test_load_into_calls_every_setter_with_record_values() {
        // Arrange
        let (_dir, session) = make_session();
        let mut view = MockSettingsView::new();
        view.expect_set_directories()
            .with(eq(vec!["E:/Space".to_string()]))
            .times(1)
            .return_const(());
        view.expect_set_excluded_directories()
            .with(eq(vec![
                "E:/Space/Memes".to_string(),
                "E:/Space/Models".to_string(),
            ]))
            .times(1)
            .return_const(());
        view.expect_set_only_high_res()
            .with(eq(true))
            .times(1)
            .return_const(());
        view.expect_set_interval_seconds()
            .with(eq(15u32))
            .times(1)
            .return_const(());

        // Act / Assert – expectations are verified when the mock is dropped
        session.load_into(&mut view);
    }

    // ── is_unchanged ──────────────────────────────────────────────────────────

    #[test]
    fn test_is_unchanged_true_right_after_load_into() {
        let (_dir, session) = make_session();
        let view = loaded_view(&session);
        assert!(session.is_unchanged(&view));
    }

    #[test]
    fn test_is_unchanged_false_after_adding_directory() {
        let (_dir, session) = make_session();
        let mut view = loaded_view(&session);

        view.directories.push("F:/Nebulae".to_string());

        assert!(!session.is_unchanged(&view));
    }

    #[test]
    fn test_is_unchanged_false_after_editing_exclusions() {
        let (_dir, session) = make_session();
        let mut view = loaded_view(&session);

        view.excluded.pop();

        assert!(!session.is_unchanged(&view));
    }

    #[test]
    fn test_is_unchanged_false_after_toggling_high_res() {
        let (_dir, session) = make_session();
        let mut view = loaded_view(&session);

        view.only_high_res = !view.only_high_res;

        assert!(!session.is_unchanged(&view));
    }

    #[test]
    fn test_is_unchanged_false_after_changing_interval() {
        let (_dir, session) = make_session();
        let mut view = loaded_view(&session);

        view.interval = 16;

        assert!(!session.is_unchanged(&view));
    }

    #[test]
    fn test_is_unchanged_is_order_sensitive() {
        // Arrange
        let (_dir, session) = make_session();
        let mut view = loaded_view(&session);

        // Act – same elements, swapped order
        view.excluded.reverse();

        // Assert
        assert!(!session.is_unchanged(&view));
    }

    #[test]
    fn test_is_unchanged_compares_against_persisted_not_working_record() {
        // Arrange
        let (_dir, mut session) = make_session();
        let view = loaded_view(&session);

        // Act – an unsaved set() changes the working record only
        session.set("interval_seconds", json!(99)).unwrap();

        // Assert
        assert!(session.is_unchanged(&view));
    }

    // ── commit ────────────────────────────────────────────────────────────────

    #[test]
    fn test_commit_writes_view_to_disk() {
        // Arrange
        let (_dir, mut session) = make_session();
        let mut view = loaded_view(&session);
        view.directories = vec!["D:/Photos".to_string()];
        view.interval = 120;

        // Act
        session.commit(&view).unwrap();

        // Assert
        assert!(session.is_unchanged(&view));
        let reopened = ConfigStore::open(session.settings_path()).unwrap();
        assert_eq!(reopened.settings().directories, vec!["D:/Photos"]);
        assert_eq!(reopened.settings().interval_seconds, 120);
    }

    #[test]
    fn test_commit_reads_each_getter_once() {
        // Arrange
        let (_dir, mut session) = make_session();
        let mut view = MockSettingsView::new();
        view.expect_directories()
            .times(1)
            .return_const(vec!["D:/Photos".to_string()]);
        view.expect_excluded_directories()
            .times(1)
            .return_const(Vec::<String>::new());
        view.expect_only_high_res().times(1).return_const(false);
        view.expect_interval_seconds().times(1).return_const(5u32);

        // Act
        session.commit(&view).unwrap();

        // Assert
        let persisted = session.store().persisted();
        assert_eq!(persisted.directories, vec!["D:/Photos"]);
        assert!(persisted.excluded_directories.is_empty());
        assert!(!persisted.only_high_res);
        assert_eq!(persisted.interval_seconds, 5);
    }

    // ── close_request ─────────────────────────────────────────────────────────

    #[test]
    fn test_close_request_closes_when_unchanged() {
        let (_dir, session) = make_session();
        let view = loaded_view(&session);
        assert_eq!(session.close_request(&view), CloseDecision::Close);
    }

    #[test]
    fn test_close_request_asks_when_view_has_unsaved_edits() {
        let (_dir, session) = make_session();
        let mut view = loaded_view(&session);
        view.only_high_res = false;
        assert_eq!(session.close_request(&view), CloseDecision::ConfirmDiscard);
    }

    // ── get / set / reset ─────────────────────────────────────────────────────

    #[test]
    fn test_set_shape_error_surfaces_through_session() {
        let (_dir, mut session) = make_session();

        let err = session.set("directories", json!(5)).unwrap_err();

        assert_eq!(err.to_string(), "Invalid value for 'directories'");
    }

    #[test]
    fn test_set_then_get_returns_new_value() {
        let (_dir, mut session) = make_session();

        session.set("interval_seconds", json!(30)).unwrap();

        assert_eq!(session.get("interval_seconds").unwrap(), json!(30));
    }

    #[test]
    fn test_reset_into_restores_defaults_in_view_and_on_disk() {
        // Arrange
        let (_dir, mut session) = make_session();
        let mut view = loaded_view(&session);
        view.directories.clear();
        session.commit(&view).unwrap();

        // Act
        session.reset_into(&mut view).unwrap();

        // Assert
        assert_eq!(view.directories, vec!["E:/Space"]);
        assert!(session.is_unchanged(&view));
        assert_eq!(session.store().persisted(), &Settings::default());
    }
}
