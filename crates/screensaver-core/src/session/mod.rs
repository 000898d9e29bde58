//! Editor session: the contract between the settings store and a UI.
//!
//! - **`editor`** – [`editor::EditorSession`] and the [`editor::SettingsView`]
//!   trait a presentation layer implements.

pub mod editor;
