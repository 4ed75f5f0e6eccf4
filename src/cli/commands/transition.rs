//! Transition command implementation.
//!
//! The role-aware boundary for status changes: the permission table is
//! consulted before the status machine.

use civic_core::{Issue, Result, Role, Status};

use crate::cli::TransitionArgs;
use crate::cli::commands::Context;
use crate::format::format_issue_line;

/// Execute the transition command.
///
/// # Errors
///
/// Returns an error if the status or role is unknown, the issue is not
/// found, or the role may not make the move.
pub fn execute(args: &TransitionArgs, ctx: &mut Context) -> Result<()> {
    let to: Status = args.status.parse()?;
    let role: Role = args.role.parse()?;
    let issue = apply(ctx, &args.id, to, role, args.comment.as_deref())?;

    if ctx.json {
        ctx.print_json(&issue)?;
    } else {
        println!("{}", format_issue_line(&issue));
    }

    Ok(())
}

fn apply(
    ctx: &mut Context,
    id: &str,
    to: Status,
    role: Role,
    comment: Option<&str>,
) -> Result<Issue> {
    if role == Role::Citizen && to == Status::Closed {
        return ctx.store.verify(id, comment);
    }
    if comment.is_some() {
        tracing::warn!(id, %to, "comment ignored: only kept when a citizen verifies a fix");
    }
    ctx.store.transition(id, to, role)
}
