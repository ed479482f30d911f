//! commit command - Reconcile the staging index into a new commit

use crate::cli::Context;
use crate::core::error::Result;
use crate::core::repo::Repository;

/// Create a commit from the staged changes.
pub fn commit(ctx: &Context, message: &str) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;
    repo.commit(message)?;
    Ok(())
}
