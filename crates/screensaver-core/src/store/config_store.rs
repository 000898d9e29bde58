//! JSON persistence of the settings record.
//!
//! [`ConfigStore`] is the single source of truth for `settings.json`.  It
//! holds two copies of the record:
//!
//! - the **working** record, which `set` / `replace` / `reset` mutate, and
//! - the **persisted** snapshot, i.e. the record as it was last read from or
//!   written to disk.  The editor session compares against this one to decide
//!   whether the user has unsaved changes.
//!
//! # Self-healing load (for beginners)
//!
//! A settings file can drift from the current schema: an older build may not
//! have written a newer key, or a hand edit may have added a typo'd key.  On
//! every load the store *reconciles* the file against the defaults (missing
//! keys filled in, unknown keys dropped, wrongly typed values reset) and, if
//! anything changed, writes the repaired record straight back.  The next
//! start-up then reads a clean file.
//!
//! # Atomic writes
//!
//! `save` never writes into `settings.json` directly.  It writes a uniquely
//! named temp file next to it, flushes it to disk, and renames it over the
//! target.  A rename within one directory is atomic, so a crash mid-write
//! leaves either the old file or the new one, never a truncated mix.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::settings::{SettingKey, Settings};
use crate::domain::shape::{reconcile, similar_objects, ReconcileReport};

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but does not hold a JSON object.
    #[error("settings file {path} is corrupt: {reason}")]
    CorruptConfig { path: PathBuf, reason: String },

    /// The record could not be serialized to JSON.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    /// `get` / `set` was called with a name outside the schema.
    #[error("unknown setting key: {0}")]
    UnknownKey(String),

    /// `set` was given a value that does not fit the schema.
    #[error("Invalid value for '{key}'")]
    InvalidValue { key: String },
}

/// What `load` does with a file that is not valid JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptPolicy {
    /// Fail the load with [`ConfigError::CorruptConfig`].
    #[default]
    Fail,
    /// Rename the file to `<name>.corrupt` and start over from defaults.
    BackupAndReset,
}

/// Options controlling how a [`ConfigStore`] treats the file it opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    pub on_corrupt: CorruptPolicy,
}

/// Owns the settings file and the in-memory record.
#[derive(Debug)]
pub struct ConfigStore {
    /// Path to `settings.json`.
    path: PathBuf,
    /// Working record.
    settings: Settings,
    /// Record as last read from or written to disk.
    persisted: Settings,
    options: StoreOptions,
}

impl ConfigStore {
    /// Opens the settings file at `path` with default options.
    ///
    /// See [`ConfigStore::open_with`].
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::open_with(path, StoreOptions::default())
    }

    /// Opens the settings file at `path`, creating it with defaults if absent.
    ///
    /// The parent directory is created first.  An existing file is loaded and
    /// reconciled (see [`ConfigStore::load`]).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the directory cannot be created or the
    /// file cannot be read or written, and [`ConfigError::CorruptConfig`] for a
    /// malformed file under [`CorruptPolicy::Fail`].
    pub fn open_with(path: impl Into<PathBuf>, options: StoreOptions) -> Result<Self, ConfigError> {
        let path = path.into();
        ensure_parent_dir(&path)?;

        let mut store = Self {
            path,
            settings: Settings::default(),
            persisted: Settings::default(),
            options,
        };

        if store.path.exists() {
            store.load()?;
        } else {
            info!(path = %store.path.display(), "no settings file yet; writing defaults");
            store.reset()?;
        }
        Ok(store)
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The working record.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The record as last read from or written to disk.
    pub fn persisted(&self) -> &Settings {
        &self.persisted
    }

    /// Returns `true` if the working record differs from the file on disk.
    pub fn is_dirty(&self) -> bool {
        self.settings != self.persisted
    }

    /// Replaces the whole working record.  Does not write to disk.
    pub fn replace(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Reads and reconciles the settings file.
    ///
    /// Both the working record and the persisted snapshot are replaced.  If
    /// reconciliation changed anything the repaired record is written back
    /// before returning; when that write fails both are left as they were.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] on read / write failure and
    /// [`ConfigError::CorruptConfig`] for malformed JSON under
    /// [`CorruptPolicy::Fail`].
    pub fn load(&mut self) -> Result<ReconcileReport, ConfigError> {
        let text = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;

        let mut record = match parse_record(&self.path, &text) {
            Ok(record) => record,
            Err(err) => return self.recover_from_corrupt(err),
        };

        let mut report = reconcile(&mut record, &Settings::default_record());

        // After reconciliation every schema key is present; only the types
        // remain to be checked.
        let mut settings = Settings::default();
        for key in SettingKey::ALL {
            if let Some(value) = record.get(key.as_str()) {
                if let Err(err) = settings.set_field(key, value) {
                    warn!(%err, dropped = %value, "resetting mistyped setting to its default");
                    report.replaced.push(key.as_str().to_string());
                }
            }
        }

        if report.changed() {
            warn!(
                added = ?report.added,
                removed = ?report.removed,
                replaced = ?report.replaced,
                "settings file did not match the schema; rewriting"
            );
            // `persisted` only moves once the repaired record is on disk.
            let previous = std::mem::replace(&mut self.settings, settings);
            if let Err(err) = self.save() {
                self.settings = previous;
                return Err(err);
            }
        } else {
            self.settings = settings.clone();
            self.persisted = settings;
            debug!(path = %self.path.display(), "settings loaded");
        }
        Ok(report)
    }

    /// Writes the working record to disk atomically.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system failures or
    /// [`ConfigError::Serialize`] if serialization fails.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self.settings)?;
        atomic_write(&self.path, &content)?;
        self.persisted = self.settings.clone();
        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Replaces the working record with the defaults and persists it.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigStore::save`].
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.settings = Settings::default();
        self.save()?;
        info!("settings reset to defaults");
        Ok(())
    }

    /// Returns one field of the working record as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for a name outside the schema.
    pub fn get(&self, key: &str) -> Result<Value, ConfigError> {
        let key = parse_key(key)?;
        Ok(self.settings.field(key))
    }

    /// Sets one field of the working record from JSON.  Does not write to disk.
    ///
    /// The candidate record must have the same shape as the defaults and the
    /// value must pass the field's type check.  On failure the working record
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for a name outside the schema and
    /// [`ConfigError::InvalidValue`] when validation fails.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        let setting_key = parse_key(key)?;
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
        };

        let mut candidate = self.settings.to_record();
        candidate.insert(key.to_string(), value.clone());
        if !similar_objects(&candidate, &Settings::default_record()) {
            return Err(invalid());
        }

        let mut next = self.settings.clone();
        next.set_field(setting_key, &value).map_err(|err| {
            debug!(%err, "rejected setting value");
            invalid()
        })?;
        self.settings = next;
        Ok(())
    }

    /// Applies the configured [`CorruptPolicy`] to a failed parse.
    fn recover_from_corrupt(&mut self, err: ConfigError) -> Result<ReconcileReport, ConfigError> {
        match self.options.on_corrupt {
            CorruptPolicy::Fail => Err(err),
            CorruptPolicy::BackupAndReset => {
                let backup = corrupt_backup_path(&self.path);
                fs::rename(&self.path, &backup).map_err(|source| ConfigError::Io {
                    path: backup.clone(),
                    source,
                })?;
                warn!(
                    %err,
                    backup = %backup.display(),
                    "corrupt settings file moved aside; starting from defaults"
                );
                self.reset()?;
                Ok(ReconcileReport {
                    replaced: SettingKey::ALL
                        .iter()
                        .map(|key| key.as_str().to_string())
                        .collect(),
                    ..ReconcileReport::default()
                })
            }
        }
    }
}

/// Path the corrupt file is moved to under [`CorruptPolicy::BackupAndReset`].
pub fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".corrupt");
    path.with_file_name(name)
}

fn parse_key(key: &str) -> Result<SettingKey, ConfigError> {
    key.parse()
        .map_err(|_| ConfigError::UnknownKey(key.to_string()))
}

/// Parses the file content into a JSON object.
fn parse_record(path: &Path, text: &str) -> Result<Map<String, Value>, ConfigError> {
    let corrupt = |reason: String| ConfigError::CorruptConfig {
        path: path.to_path_buf(),
        reason,
    };
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(record)) => Ok(record),
        Ok(other) => Err(corrupt(format!(
            "expected a JSON object at the top level, found {}",
            json_kind(&other)
        ))),
        Err(e) => Err(corrupt(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), ConfigError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Writes `content` to `path` via a temp file and rename.
fn atomic_write(path: &Path, content: &str) -> Result<(), ConfigError> {
    ensure_parent_dir(path)?;

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
    let temp_path = path.with_file_name(temp_name);

    let written = write_synced(&temp_path, content).and_then(|()| fs::rename(&temp_path, path));
    if let Err(source) = written {
        // Best effort: the temp file is garbage either way.
        let _ = fs::remove_file(&temp_path);
        return Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn write_synced(path: &Path, content: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
