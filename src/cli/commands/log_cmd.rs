//! log / global-log / find commands - History queries

use crate::cli::Context;
use crate::core::error::Result;
use crate::core::repo::Repository;
use crate::ui::output;

/// Print the current branch's commit chain, most recent first.
pub fn log(ctx: &Context) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;
    for entry in repo.log()? {
        // format_log_entry ends at the message line; printing it as a
        // line adds the blank separator between entries.
        output::print(output::format_log_entry(&entry), ctx.verbosity);
    }
    Ok(())
}

/// Print every commit ever stored, unordered.
pub fn global_log(ctx: &Context) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;
    for entry in repo.global_log()? {
        output::print(output::format_log_entry(&entry), ctx.verbosity);
    }
    Ok(())
}

/// Print the ids of all commits with exactly the given message.
pub fn find(ctx: &Context, message: &str) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;
    for id in repo.find(message)? {
        output::print(id, ctx.verbosity);
    }
    Ok(())
}
