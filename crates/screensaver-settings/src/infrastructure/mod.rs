//! Infrastructure layer for the settings editor.
//!
//! Contains OS- and presentation-facing adapters: the headless view model the
//! command-line front end drives, and the file-browser launcher.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `screensaver_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.

pub mod file_locator;
pub mod ui_bridge;
