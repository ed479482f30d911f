//! branch / rm-branch commands - Branch management

use crate::cli::Context;
use crate::core::error::Result;
use crate::core::repo::Repository;

/// Create a branch pointing at the current commit.
pub fn branch(ctx: &Context, name: &str) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;
    repo.create_branch(name)
}

/// Delete a branch. The current branch cannot be deleted.
pub fn rm_branch(ctx: &Context, name: &str) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;
    repo.delete_branch(name)
}
