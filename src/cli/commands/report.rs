//! Report command implementation.
//!
//! Validates the form, then hands the draft to the submission pipeline
//! with the configured timeout and retry policy.

use civic_core::submit::{LocalSubmitter, submit_with_retry};
use civic_core::{CivicError, Result};

use crate::cli::ReportArgs;
use crate::cli::commands::Context;
use crate::format::{ReportReceipt, format_issue_details};
use crate::validation::ReportForm;

/// Execute the report command.
///
/// # Errors
///
/// Returns the collected validation errors, `MissingLocation`, or
/// `SubmissionFailed` if the report could not be stored.
pub fn execute(args: ReportArgs, ctx: &mut Context) -> Result<()> {
    let (form, dropped_images) = build_form(args);
    let draft = form.into_draft()?;
    let policy = ctx.config.submit.policy();

    let submission = {
        let mut submitter = LocalSubmitter::new(&mut ctx.store);
        submit_with_retry(&mut submitter, &draft, &policy)
    };
    let attempts = submission.attempts;
    let issue = submission
        .into_result()
        .map_err(|source| CivicError::SubmissionFailed { attempts, source })?;
    tracing::info!(id = %issue.id, attempts, "report stored");

    if ctx.json {
        ctx.print_json(&ReportReceipt {
            issue,
            attempts,
            dropped_images,
        })?;
    } else {
        println!("Report submitted: {}", issue.id);
        if dropped_images > 0 {
            println!("({dropped_images} extra photo(s) not attached)");
        }
        println!("{}", format_issue_details(&issue, &[]));
    }

    Ok(())
}

/// Map CLI args onto the form, keeping the first photos.
fn build_form(args: ReportArgs) -> (ReportForm, usize) {
    let mut form = ReportForm {
        title: args.title,
        description: args.description,
        category: args.category,
        priority: args.priority,
        lat: args.lat,
        lng: args.lng,
        address: args.address,
        reporter_name: args.name,
        reporter_email: args.email,
        images: Vec::new(),
    };
    let dropped = form.add_images(args.images);
    (form, dropped)
}
