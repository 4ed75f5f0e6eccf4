//! Assignees command implementation.

use civic_core::Result;

use crate::cli::commands::Context;

/// Execute the assignees command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &Context) -> Result<()> {
    let names = ctx.store.assignee_names();

    if ctx.json {
        ctx.print_json(&names)?;
    } else if names.is_empty() {
        println!("No assigned issues.");
    } else {
        for name in &names {
            println!("{name}");
        }
    }

    Ok(())
}
