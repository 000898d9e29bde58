//! Headless presentation bridge: an in-memory view plus display DTOs.
//!
//! A GUI implements [`SettingsView`] on top of its list boxes, checkbox and
//! spinbox.  The command-line front end has no widgets, so this module provides
//! [`SettingsViewModel`]: the same four fields held in plain memory.  The
//! [`EditorSession`](screensaver_core::EditorSession) cannot tell the
//! difference.
//!
//! # Data Transfer Objects (DTOs)
//!
//! [`SettingsDto`] is the serialisable snapshot printed by `show --json`.  Its
//! field names match the keys in `settings.json`, so scripts can read either
//! one with the same code.

use serde::Serialize;

use screensaver_core::{Settings, SettingsView};

// ── View model ────────────────────────────────────────────────────────────────

/// In-memory implementation of [`SettingsView`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsViewModel {
    directories: Vec<String>,
    excluded_directories: Vec<String>,
    only_high_res: bool,
    interval_seconds: u32,
}

impl From<&Settings> for SettingsViewModel {
    fn from(settings: &Settings) -> Self {
        Self {
            directories: settings.directories.clone(),
            excluded_directories: settings.excluded_directories.clone(),
            only_high_res: settings.only_high_res,
            interval_seconds: settings.interval_seconds,
        }
    }
}

impl SettingsView for SettingsViewModel {
    fn directories(&self) -> Vec<String> {
        self.directories.clone()
    }

    fn set_directories(&mut self, directories: Vec<String>) {
        self.directories = directories;
    }

    fn excluded_directories(&self) -> Vec<String> {
        self.excluded_directories.clone()
    }

    fn set_excluded_directories(&mut self, directories: Vec<String>) {
        self.excluded_directories = directories;
    }

    fn only_high_res(&self) -> bool {
        self.only_high_res
    }

    fn set_only_high_res(&mut self, only_high_res: bool) {
        self.only_high_res = only_high_res;
    }

    fn interval_seconds(&self) -> u32 {
        self.interval_seconds
    }

    fn set_interval_seconds(&mut self, seconds: u32) {
        self.interval_seconds = seconds;
    }
}

impl SettingsViewModel {
    /// Renders the view as the text shown by `show`.
    ///
    /// List entries are numbered from 0 so the numbers can be passed straight
    /// to `remove-dir` / `unexclude`.
    pub fn render_text(&self) -> String {
        let high_res = if self.only_high_res { "yes" } else { "no" };
        let mut lines = render_list("Directories", &self.directories);
        lines.extend(render_list("Excluded directories", &self.excluded_directories));
        lines.push(format!("Only high resolution photos: {high_res}"));
        lines.push(format!("Interval (sec.): {}", self.interval_seconds));
        lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

fn render_list(title: &str, entries: &[String]) -> Vec<String> {
    let mut lines = vec![format!("{title}:")];
    if entries.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| format!("  [{index}] {entry}")),
    );
    lines
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// Serialisable snapshot of the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsDto {
    pub directories: Vec<String>,
    pub excluded_directories: Vec<String>,
    pub only_high_res: bool,
    pub interval_seconds: u32,
    /// Where the settings live on disk.
    pub settings_file: String,
}

impl SettingsDto {
    /// Builds the DTO from a view and the settings file location.
    pub fn new<V: SettingsView + ?Sized>(view: &V, settings_file: &std::path::Path) -> Self {
        Self {
            directories: view.directories(),
            excluded_directories: view.excluded_directories(),
            only_high_res: view.only_high_res(),
            interval_seconds: view.interval_seconds(),
            settings_file: settings_file.display().to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
