//! status command - Show branches and staged changes

use crate::cli::Context;
use crate::core::error::Result;
use crate::core::repo::Repository;
use crate::ui::output;

/// Print sorted branches (current starred) and the staged paths.
pub fn status(ctx: &Context) -> Result<()> {
    let repo = Repository::open(&ctx.workdir()?)?;
    let report = repo.status()?;
    output::print(output::format_status(&report), ctx.verbosity);
    Ok(())
}
