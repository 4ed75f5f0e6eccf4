//! Show command implementation.

use civic_core::policy::available_actions;
use civic_core::{Result, Role};

use crate::cli::ShowArgs;
use crate::cli::commands::Context;
use crate::format::{IssueDetails, format_issue_details};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the role is unknown or the issue is not found.
pub fn execute(args: &ShowArgs, ctx: &Context) -> Result<()> {
    let role: Role = args.role.parse()?;
    let issue = ctx.store.get(&args.id)?;
    let actions = available_actions(issue, role);

    if ctx.json {
        ctx.print_json(&IssueDetails::new(issue.clone(), &actions))?;
    } else {
        println!("{}", format_issue_details(issue, &actions));
    }

    Ok(())
}
