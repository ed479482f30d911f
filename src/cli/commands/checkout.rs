//! checkout command - Switch branches or restore files
//!
//! Three argument shapes share one command name:
//!
//! - `checkout <branch>` - switch HEAD to a branch
//! - `checkout -- <path>` - restore a file from the current commit
//! - `checkout <commit-id> -- <path>` - restore a file from that commit
//!   (the id may be a unique prefix of at least 4 characters)

use crate::cli::Context;
use crate::core::error::{Error, Result};
use crate::core::repo::Repository;

/// Dispatch the three checkout forms.
pub fn checkout(ctx: &Context, target: Option<&str>, path: &[String]) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;

    match (target, path) {
        (Some(branch), []) => repo.checkout_branch(branch),
        (None, [file]) => repo.checkout_file(file),
        (Some(commit), [file]) => repo.checkout_file_at(commit, file),
        _ => Err(Error::Usage),
    }
}
