//! The settings record persisted in `settings.json`.
//!
//! The record is a fixed set of four fields.  On disk it is a flat JSON object
//! whose keys are exactly the names returned by [`SettingKey::as_str`]:
//!
//! ```json
//! {
//!   "directories": ["E:/Space"],
//!   "excluded_directories": ["E:/Space/Memes", "E:/Space/Models"],
//!   "only_high_res": true,
//!   "interval_seconds": 15
//! }
//! ```
//!
//! # Typed record vs. dynamic access (for beginners)
//!
//! Most of the program works with the typed [`Settings`] struct: the compiler
//! guarantees `interval_seconds` is a number and `directories` is a list of
//! strings.  A presentation layer sometimes wants to address a field by name
//! instead (`get("interval_seconds")`).  [`SettingKey`] is the closed set of
//! valid names, and [`Settings::set_field`] is the per-field validator that
//! turns a loosely typed `serde_json::Value` back into a typed field, rejecting
//! anything of the wrong JSON type.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Photo directories shown on first run.
pub const DEFAULT_DIRECTORIES: &[&str] = &["E:/Space"];
/// Excluded subdirectories shown on first run.
pub const DEFAULT_EXCLUDED_DIRECTORIES: &[&str] = &["E:/Space/Memes", "E:/Space/Models"];
/// Whether only high-resolution photos are shown on first run.
pub const DEFAULT_ONLY_HIGH_RES: bool = true;
/// Slideshow interval on first run, in seconds.
pub const DEFAULT_INTERVAL_SECONDS: u32 = 15;

/// Errors produced by the per-field validators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// The name does not belong to the settings schema.
    #[error("unknown setting key: {0}")]
    UnknownKey(String),

    /// A record handed to [`Settings::from_record`] lacks a schema key.
    #[error("missing setting key: {0}")]
    Missing(SettingKey),

    /// The value has the wrong JSON type for this field.
    #[error("expected {expected} for '{key}'")]
    WrongType {
        key: SettingKey,
        expected: &'static str,
    },
}

/// Names of the four fields in the settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Directories,
    ExcludedDirectories,
    OnlyHighRes,
    IntervalSeconds,
}

impl SettingKey {
    /// Every key, in the order they appear in the file.
    pub const ALL: [SettingKey; 4] = [
        SettingKey::Directories,
        SettingKey::ExcludedDirectories,
        SettingKey::OnlyHighRes,
        SettingKey::IntervalSeconds,
    ];

    /// The JSON object key used on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::Directories => "directories",
            SettingKey::ExcludedDirectories => "excluded_directories",
            SettingKey::OnlyHighRes => "only_high_res",
            SettingKey::IntervalSeconds => "interval_seconds",
        }
    }

    /// Human-readable description of the accepted JSON type.
    fn expected(self) -> &'static str {
        match self {
            SettingKey::Directories | SettingKey::ExcludedDirectories => "a list of strings",
            SettingKey::OnlyHighRes => "a boolean",
            SettingKey::IntervalSeconds => "a non-negative integer",
        }
    }

    /// Checks that `value` has the JSON type this field requires.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::WrongType`] when the value would not fit the field.
    pub fn validate(self, value: &Value) -> Result<(), FieldError> {
        let mut probe = Settings::default();
        probe.set_field(self, value)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| FieldError::UnknownKey(s.to_string()))
    }
}

/// The complete settings value, persisted as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Photo directories, in display order.  Duplicates are allowed and paths
    /// are not checked for existence.
    pub directories: Vec<String>,
    /// Subdirectories to skip.  A flat list, independent of `directories`.
    pub excluded_directories: Vec<String>,
    /// Show only high-resolution photos.
    pub only_high_res: bool,
    /// Seconds each photo stays on screen.  The editor keeps this in
    /// `1..=9999`; the record itself accepts any `u32`.
    pub interval_seconds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directories: DEFAULT_DIRECTORIES.iter().map(|d| d.to_string()).collect(),
            excluded_directories: DEFAULT_EXCLUDED_DIRECTORIES
                .iter()
                .map(|d| d.to_string())
                .collect(),
            only_high_res: DEFAULT_ONLY_HIGH_RES,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
        }
    }
}

impl Settings {
    /// The default schema as a JSON object.
    pub fn default_record() -> Map<String, Value> {
        Settings::default().to_record()
    }

    /// Returns one field as a JSON value.
    pub fn field(&self, key: SettingKey) -> Value {
        match key {
            SettingKey::Directories => Value::from(self.directories.clone()),
            SettingKey::ExcludedDirectories => Value::from(self.excluded_directories.clone()),
            SettingKey::OnlyHighRes => Value::Bool(self.only_high_res),
            SettingKey::IntervalSeconds => Value::from(self.interval_seconds),
        }
    }

    /// Replaces one field from a JSON value.
    ///
    /// The field is left untouched when the value has the wrong type.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::WrongType`] when `value` does not fit `key`.
    pub fn set_field(&mut self, key: SettingKey, value: &Value) -> Result<(), FieldError> {
        let wrong_type = || FieldError::WrongType {
            key,
            expected: key.expected(),
        };
        match key {
            SettingKey::Directories => {
                self.directories = string_list(value).ok_or_else(wrong_type)?;
            }
            SettingKey::ExcludedDirectories => {
                self.excluded_directories = string_list(value).ok_or_else(wrong_type)?;
            }
            SettingKey::OnlyHighRes => {
                self.only_high_res = value.as_bool().ok_or_else(wrong_type)?;
            }
            SettingKey::IntervalSeconds => {
                self.interval_seconds = whole_seconds(value).ok_or_else(wrong_type)?;
            }
        }
        Ok(())
    }

    /// Converts the record into a JSON object with exactly the schema keys.
    pub fn to_record(&self) -> Map<String, Value> {
        SettingKey::ALL
            .into_iter()
            .map(|key| (key.as_str().to_string(), self.field(key)))
            .collect()
    }

    /// Builds a typed record from a JSON object.
    ///
    /// Keys outside the schema are ignored; reconciliation strips them before
    /// this is called.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Missing`] for an absent schema key and
    /// [`FieldError::WrongType`] for a value of the wrong type.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, FieldError> {
        let mut settings = Settings::default();
        for key in SettingKey::ALL {
            let value = record.get(key.as_str()).ok_or(FieldError::Missing(key))?;
            settings.set_field(key, value)?;
        }
        Ok(settings)
    }
}

/// Reads a non-negative whole number that fits in a `u32`.
///
/// Hand-edited files sometimes hold `30.0`; a float with no fractional part
/// is accepted as the integer it spells.
fn whole_seconds(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) {
        Some(f as u32)
    } else {
        None
    }
}

/// Converts a JSON array of strings into owned strings.
fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_owned))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
