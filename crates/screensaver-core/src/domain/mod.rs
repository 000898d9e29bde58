//! Domain entities for the screensaver settings.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! Nothing in here touches the file system: the record is converted to and
//! from `serde_json::Value` so that the storage layer can decide how the bytes
//! reach the disk, and tests can exercise every rule without a temp directory.

/// The typed settings record and its per-field validators.
///
/// See [`settings::Settings`] for the main type.
pub mod settings;

/// Structural comparison and reconciliation of JSON records.
pub mod shape;
