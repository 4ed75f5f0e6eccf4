//! Dispute command implementation.

use civic_core::Result;

use crate::cli::DisputeArgs;
use crate::cli::commands::Context;
use crate::format::format_issue_line;

/// Execute the dispute command.
///
/// # Errors
///
/// Returns an error if the issue is not found or has no pending
/// verification.
pub fn execute(args: &DisputeArgs, ctx: &mut Context) -> Result<()> {
    let issue = ctx.store.dispute(&args.id, args.comment.as_deref())?;

    if ctx.json {
        ctx.print_json(&issue)?;
    } else {
        println!("Disputed: {}", format_issue_line(&issue));
    }

    Ok(())
}
