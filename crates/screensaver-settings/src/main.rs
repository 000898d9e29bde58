//! Space Screensaver settings editor: command-line entry point.
//!
//! Edits `settings.json` through the same [`EditorSession`] contract a GUI
//! settings window uses: load the record into a view, apply the user's edits
//! to the view, and commit only if the view now differs from what is on disk.
//!
//! # Usage
//!
//! ```text
//! screensaver-settings [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show        Print the current settings
//!   path        Print the settings file path
//!   add-dir     Append a photo directory
//!   remove-dir  Remove a photo directory by index
//!   exclude     Append an excluded directory
//!   unexclude   Remove an excluded directory by index
//!   high-res    Set the high-resolution filter
//!   interval    Set the slideshow interval (1-9999 seconds)
//!   get         Print one setting as JSON
//!   set         Set one setting from a JSON literal and save
//!   reset       Restore the defaults
//!   reveal      Open the file browser at the settings file
//!
//! Options:
//!   --config-dir <DIR>            Directory holding settings.json
//!   --on-corrupt <fail|backup>    What to do with an unreadable file [default: backup]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                 | Default                    | Description                    |
//! |--------------------------|----------------------------|--------------------------------|
//! | `SCREENSAVER_CONFIG_DIR` | platform config directory  | Directory holding the settings |
//! | `SCREENSAVER_ON_CORRUPT` | `backup`                   | Corrupt-file policy            |
//! | `RUST_LOG`               | `warn`                     | Log filter (logs go to stderr) |

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use screensaver_core::{
    default_config_dir, settings_file_in, CorruptPolicy, EditorSession, StoreOptions,
};
use screensaver_settings::application::edit_settings::{
    edit_and_commit, PathList, SaveOutcome, ViewEdit,
};
use screensaver_settings::infrastructure::file_locator::reveal_in_file_browser;
use screensaver_settings::infrastructure::ui_bridge::{SettingsDto, SettingsViewModel};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Space Screensaver settings editor.
#[derive(Debug, Parser)]
#[command(
    name = "screensaver-settings",
    about = "Edit the photo directories, filter and interval of the Space Screensaver",
    version
)]
struct Cli {
    /// Directory holding settings.json.
    ///
    /// Defaults to the per-user config directory of the screensaver.
    #[arg(long, global = true, env = "SCREENSAVER_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// What to do when settings.json is not valid JSON.
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = CorruptArg::Backup,
        env = "SCREENSAVER_ON_CORRUPT"
    )]
    on_corrupt: CorruptArg,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CorruptArg {
    /// Stop with an error and leave the file alone.
    Fail,
    /// Move the file to settings.json.corrupt and start from defaults.
    Backup,
}

impl From<CorruptArg> for CorruptPolicy {
    fn from(arg: CorruptArg) -> Self {
        match arg {
            CorruptArg::Fail => CorruptPolicy::Fail,
            CorruptArg::Backup => CorruptPolicy::BackupAndReset,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Print the current settings.
    Show {
        /// Print as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print the settings file path.
    Path,
    /// Append a photo directory.
    AddDir { path: String },
    /// Remove a photo directory by its index in `show`.
    RemoveDir { index: usize },
    /// Append an excluded directory.
    Exclude { path: String },
    /// Remove an excluded directory by its index in `show`.
    Unexclude { index: usize },
    /// Set the high-resolution filter (true/false, yes/no, on/off).
    HighRes {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        enabled: bool,
    },
    /// Set the slideshow interval in seconds (1-9999).
    Interval { seconds: u32 },
    /// Print one setting as JSON.
    Get { key: String },
    /// Set one setting from a JSON literal (e.g. '["D:/Photos"]' or 30) and save.
    Set { key: String, value: String },
    /// Restore the default settings.
    Reset,
    /// Open the file browser at the settings file.
    Reveal,
}

// ── Resolved options ──────────────────────────────────────────────────────────

/// Everything the wiring code needs, resolved from CLI args and environment.
#[derive(Debug, Clone)]
struct CliOptions {
    settings_file: PathBuf,
    store: StoreOptions,
}

impl CliOptions {
    fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let dir = match &cli.config_dir {
            Some(dir) => dir.clone(),
            None => default_config_dir().context("locating the settings directory")?,
        };
        Ok(Self {
            settings_file: settings_file_in(&dir),
            store: StoreOptions {
                on_corrupt: cli.on_corrupt.into(),
            },
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so that `show --json` / `get` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = CliOptions::resolve(&cli)?;
    debug!(?options, "resolved options");

    let mut session = EditorSession::open_with(&options.settings_file, options.store)
        .with_context(|| format!("opening {}", options.settings_file.display()))?;

    run(cli.command, &mut session)
}

fn run(command: Cmd, session: &mut EditorSession) -> anyhow::Result<()> {
    let mut view = SettingsViewModel::default();

    match command {
        Cmd::Show { json } => {
            session.load_into(&mut view);
            if json {
                let dto = SettingsDto::new(&view, session.settings_path());
                println!("{}", serde_json::to_string_pretty(&dto)?);
            } else {
                print!("{}", view.render_text());
            }
        }
        Cmd::Path => println!("{}", session.settings_path().display()),
        Cmd::AddDir { path } => edit(
            session,
            &mut view,
            ViewEdit::AddPath {
                list: PathList::Directories,
                path,
            },
        )?,
        Cmd::RemoveDir { index } => edit(
            session,
            &mut view,
            ViewEdit::RemovePath {
                list: PathList::Directories,
                index,
            },
        )?,
        Cmd::Exclude { path } => edit(
            session,
            &mut view,
            ViewEdit::AddPath {
                list: PathList::Excluded,
                path,
            },
        )?,
        Cmd::Unexclude { index } => edit(
            session,
            &mut view,
            ViewEdit::RemovePath {
                list: PathList::Excluded,
                index,
            },
        )?,
        Cmd::HighRes { enabled } => edit(session, &mut view, ViewEdit::SetOnlyHighRes(enabled))?,
        Cmd::Interval { seconds } => edit(session, &mut view, ViewEdit::SetInterval(seconds))?,
        Cmd::Get { key } => {
            let value = session.get(&key)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Cmd::Set { key, value } => {
            let value: serde_json::Value = serde_json::from_str(&value)
                .with_context(|| format!("'{value}' is not a JSON literal"))?;
            session.set(&key, value)?;
            session.load_into(&mut view);
            session.commit(&view)?;
            println!("Saved.");
        }
        Cmd::Reset => {
            session.reset_into(&mut view)?;
            println!("Settings reset to defaults.");
        }
        Cmd::Reveal => {
            reveal_in_file_browser(session.settings_path())?;
        }
    }
    Ok(())
}

/// Runs one edit through the load → edit → commit-if-changed flow.
fn edit(session: &mut EditorSession, view: &mut SettingsViewModel, edit: ViewEdit) -> anyhow::Result<()> {
    match edit_and_commit(session, view, &[edit])? {
        SaveOutcome::Saved => {
            info!(path = %session.settings_path().display(), "settings updated");
            println!("Saved.");
        }
        SaveOutcome::Unchanged => println!("No changes."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_high_res_accepts_boolish_values() {
        for (word, expected) in [("true", true), ("off", false), ("yes", true), ("0", false)] {
            let cli = Cli::try_parse_from(["screensaver-settings", "high-res", word]).unwrap();
            match cli.command {
                Cmd::HighRes { enabled } => assert_eq!(enabled, expected, "word {word}"),
                other => panic!("unexpected command {other:?}"),
            }
        }
    }

    #[test]
    fn test_on_corrupt_defaults_to_backup() {
        let cli = Cli::try_parse_from(["screensaver-settings", "show"]).unwrap();
        if std::env::var_os("SCREENSAVER_ON_CORRUPT").is_none() {
            assert_eq!(cli.on_corrupt, CorruptArg::Backup);
        }
    }

    #[test]
    fn test_config_dir_flag_resolves_settings_file() {
        let cli = Cli::try_parse_from([
            "screensaver-settings",
            "--config-dir",
            "/tmp/saver",
            "--on-corrupt",
            "fail",
            "path",
        ])
        .unwrap();

        let options = CliOptions::resolve(&cli).unwrap();

        assert_eq!(options.settings_file, PathBuf::from("/tmp/saver/settings.json"));
        assert_eq!(options.store.on_corrupt, CorruptPolicy::Fail);
    }
}
