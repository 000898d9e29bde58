//! Storage: settings file persistence.
//!
//! This module is the thin adapter between the settings record and the file
//! system.
//!
//! - `location`     – Resolves the per-user config directory and file name.
//! - `config_store` – Reads, reconciles and atomically writes `settings.json`.
//!
//! The record itself lives in [`crate::domain`]; nothing in this module decides
//! what a valid setting is, only how it reaches the disk.

pub mod config_store;
pub mod location;
