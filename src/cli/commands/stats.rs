//! Stats command implementation.

use civic_core::Result;

use crate::cli::commands::Context;
use crate::format::{StatsSummary, format_statistics};

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &Context) -> Result<()> {
    let stats = ctx.store.stats();

    if ctx.json {
        ctx.print_json(&StatsSummary::from(stats))?;
    } else {
        println!("{}", format_statistics(&stats));
    }

    Ok(())
}
