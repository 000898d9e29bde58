//! Application layer use cases for the settings editor.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (the settings record, owned by `screensaver-core`) and the infrastructure
//! (terminal output, file browser, a GUI toolkit).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** the core types to fulfil a user goal (e.g., "remove the
//!   second excluded directory and save").
//! - **Depend on abstractions** (the `SettingsView` trait) rather than on a
//!   concrete view, so a GUI and the command-line front end share the code.
//! - **Contain no terminal I/O and no process spawning**.
//!
//! # Sub-modules
//!
//! - **`edit_settings`** – The editing operations a settings window wires to
//!   its buttons (add / remove path, toggle filter, change interval) and the
//!   load → edit → commit-if-changed flow.

pub mod edit_settings;
