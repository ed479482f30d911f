//! merge command - Merge a branch into the current branch

use crate::cli::Context;
use crate::core::error::Result;
use crate::core::repo::{MergeOutcome, Repository};
use crate::ui::output;

/// Merge the named branch into the current one and report the outcome.
pub fn merge(ctx: &Context, branch: &str) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;
    match repo.merge(branch)? {
        MergeOutcome::GivenIsAncestor => {
            output::print(
                "Given branch is an ancestor of the current branch.",
                ctx.verbosity,
            );
        }
        MergeOutcome::FastForward(_) => {
            output::print("Current branch fast-forwarded.", ctx.verbosity);
        }
        MergeOutcome::Merged { conflicts, .. } => {
            for _ in &conflicts {
                output::print("Encountered a merge conflict.", ctx.verbosity);
            }
        }
    }
    Ok(())
}
