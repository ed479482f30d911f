//! add / rm commands - Stage files for addition or removal

use crate::cli::Context;
use crate::core::error::Result;
use crate::core::repo::Repository;

/// Stage a file for addition in the next commit.
pub fn add(ctx: &Context, path: &str) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;
    repo.stage_for_add(path)
}

/// Stage a file for removal and delete it from the working directory.
pub fn rm(ctx: &Context, path: &str) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;
    repo.stage_for_remove(path)
}
