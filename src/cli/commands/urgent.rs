//! Urgent command implementation: the authority dashboard's "needs
//! attention" panel.

use civic_core::Result;
use civic_core::filter::sort_issues;
use civic_core::SortOrder;

use crate::cli::commands::Context;
use crate::format::format_issue_line;

/// Execute the urgent command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &Context) -> Result<()> {
    let mut issues = ctx.store.urgent();
    sort_issues(&mut issues, SortOrder::Priority);

    if ctx.json {
        ctx.print_json(&issues)?;
    } else if issues.is_empty() {
        println!("No urgent issues.");
    } else {
        for issue in &issues {
            println!("{}", format_issue_line(issue));
        }
        println!("\n{} urgent issue(s)", issues.len());
    }

    Ok(())
}
