//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Map errors to the fixed user-facing message surface
//!
//! # Error surface
//!
//! Parse failures and expected user errors print their message on stdout
//! and exit cleanly; only fatal errors (corruption, I/O) propagate with a
//! nonzero exit. This keeps the command surface scriptable: "nothing to
//! commit" is an answer, not a crash.

pub mod args;
pub mod commands;

pub use args::{Cli, Command};

use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;

use crate::core::error::Error;
use crate::ui::Verbosity;

/// Per-invocation context derived from global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory to operate in; defaults to the process working directory.
    pub cwd: Option<PathBuf>,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

impl Context {
    /// Resolve the directory every operation runs against.
    pub fn workdir(&self) -> Result<PathBuf, Error> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_parse_error(err),
    };

    let ctx = Context {
        cwd: cli.cwd.clone(),
        verbosity: Verbosity::from_flags(cli.quiet),
    };

    match commands::dispatch(cli.command, &ctx) {
        Ok(()) => Ok(()),
        // Expected user errors are answers, not failures.
        Err(err) if !err.is_fatal() => {
            println!("{err}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Map clap's parse errors onto the fixed usage-message surface.
fn report_parse_error(err: clap::Error) -> Result<()> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            err.print()?;
            Ok(())
        }
        ErrorKind::InvalidSubcommand => {
            println!("No command with that name exists.");
            Ok(())
        }
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            println!("Please enter a command.");
            Ok(())
        }
        _ => {
            println!("Incorrect operands.");
            Ok(())
        }
    }
}
