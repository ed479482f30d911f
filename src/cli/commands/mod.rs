//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Opens the repository and calls one engine operation
//! 3. Formats and displays output
//!
//! Handlers do NOT perform repository mutations directly; every state
//! change flows through [`crate::core::repo::Repository`].

mod branch_cmd;
mod checkout;
mod commit_cmd;
mod init;
mod log_cmd;
mod merge;
mod reset;
mod stage;
mod status;

// Re-export command functions for testing and direct invocation
pub use branch_cmd::{branch, rm_branch};
pub use checkout::checkout;
pub use commit_cmd::commit;
pub use init::init;
pub use log_cmd::{find, global_log, log};
pub use merge::merge;
pub use reset::reset;
pub use stage::{add, rm};
pub use status::status;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::error::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Init => init(ctx),
        Command::Add { path } => add(ctx, &path),
        Command::Commit { message } => commit(ctx, &message),
        Command::Rm { path } => rm(ctx, &path),
        Command::Log => log(ctx),
        Command::GlobalLog => global_log(ctx),
        Command::Find { message } => find(ctx, &message),
        Command::Status => status(ctx),
        Command::Branch { name } => branch(ctx, &name),
        Command::RmBranch { name } => rm_branch(ctx, &name),
        Command::Reset { commit } => reset(ctx, &commit),
        Command::Merge { branch } => merge(ctx, &branch),
        Command::Checkout { target, path } => checkout(ctx, target.as_deref(), &path),
    }
}
