//! init command - Create a repository in the working directory

use crate::cli::Context;
use crate::core::error::Result;
use crate::core::repo::Repository;

/// Create the repository layout, the root commit, and the default branch.
pub fn init(ctx: &Context) -> Result<()> {
    let root = ctx.workdir()?;
    Repository::init(&root)?;
    Ok(())
}
