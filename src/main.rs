//! strata binary entry point.

use std::process;

fn main() {
    if let Err(err) = strata::cli::run() {
        strata::ui::output::error(&err);
        process::exit(1);
    }
}
