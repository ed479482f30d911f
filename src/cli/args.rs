//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strata - a tiny content-addressed version-control system
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if strata was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
///
/// Each maps 1:1 to one engine operation; the handlers in
/// [`crate::cli::commands`] stay thin.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty repository with its root commit
    Init,

    /// Stage a file for addition
    Add {
        /// Path of the file to stage
        path: String,
    },

    /// Record the staged changes as a new commit
    Commit {
        /// Commit message
        message: String,
    },

    /// Stage a file for removal and delete it from the working directory
    Rm {
        /// Path of the file to remove
        path: String,
    },

    /// Show the current branch's history, most recent first
    Log,

    /// Show every commit ever made, in no particular order
    #[command(name = "global-log")]
    GlobalLog,

    /// Print the ids of all commits with the given message
    Find {
        /// Exact message to look for
        message: String,
    },

    /// Show branches and staged changes
    Status,

    /// Create a branch at the current commit
    Branch {
        /// Name of the new branch
        name: String,
    },

    /// Delete a branch
    #[command(name = "rm-branch")]
    RmBranch {
        /// Name of the branch to delete
        name: String,
    },

    /// Move the current branch to a commit and check it out
    Reset {
        /// Target commit id (or unique prefix)
        commit: String,
    },

    /// Merge a branch into the current branch
    Merge {
        /// Branch to merge in
        branch: String,
    },

    /// Switch branches, or restore files with `-- <path>`
    ///
    /// Three forms: `checkout <branch>`, `checkout -- <path>` (restore
    /// from the current commit), `checkout <commit-id> -- <path>`.
    Checkout {
        /// Branch name, or a commit id when restoring a file
        target: Option<String>,

        /// File to restore (after `--`)
        #[arg(last = true)]
        path: Vec<String>,
    },
}
