//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! The history and status listings have fixed textual formats; they are
//! produced here so every command prints them identically. General
//! printing respects the quiet flag via [`Verbosity`].

use std::fmt::Display;
use std::fmt::Write as _;

use crate::core::repo::{LogEntry, StatusReport};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
}

impl Verbosity {
    /// Create verbosity from the quiet flag.
    pub fn from_flags(quiet: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Render one history entry in the fixed log format.
///
/// ```text
/// ===
/// commit 3e8bf1d...
/// Merge: 3e8bf1d 9a02c44        (merge commits only)
/// Date: Thu Jan 1 00:00:00 1970 +0000
/// initial commit
/// ```
pub fn format_log_entry(entry: &LogEntry) -> String {
    let mut out = String::new();
    writeln!(out, "===").unwrap();
    writeln!(out, "commit {}", entry.id).unwrap();
    if let (Some(first), Some(second)) = (&entry.commit.parent, &entry.commit.second_parent) {
        writeln!(out, "Merge: {} {}", first.short(7), second.short(7)).unwrap();
    }
    writeln!(out, "Date: {}", entry.commit.timestamp).unwrap();
    writeln!(out, "{}", entry.commit.message).unwrap();
    out
}

/// Render the full status listing.
pub fn format_status(report: &StatusReport) -> String {
    let mut out = String::new();
    writeln!(out, "=== Branches ===").unwrap();
    for branch in &report.branches {
        if *branch == report.current_branch {
            writeln!(out, "*{branch}").unwrap();
        } else {
            writeln!(out, "{branch}").unwrap();
        }
    }
    writeln!(out).unwrap();
    writeln!(out, "=== Staged Files ===").unwrap();
    for path in &report.staged {
        writeln!(out, "{path}").unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "=== Removed Files ===").unwrap();
    for path in &report.removed {
        writeln!(out, "{path}").unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "=== Modifications Not Staged For Commit ===").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "=== Untracked Files ===").unwrap();
    out
}
