//! reset command - Move the current branch to a commit

use crate::cli::Context;
use crate::core::error::Result;
use crate::core::repo::Repository;

/// Check out the given commit and rewrite the current branch pointer to it.
pub fn reset(ctx: &Context, commit: &str) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;
    repo.reset(commit)
}
