//! List command implementation.
//!
//! Primary discovery interface: every filter dimension, three sort
//! orders and an optional limit.

use civic_core::filter::{filter_issues, sort_issues};
use civic_core::query::parse_dimension;
use civic_core::{AssigneeFilter, Issue, IssueFilter, Result, SortOrder};

use crate::cli::ListArgs;
use crate::cli::commands::Context;
use crate::format::format_issue_line;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if a filter value or the sort order is invalid.
pub fn execute(args: &ListArgs, ctx: &Context) -> Result<()> {
    let filter = build_filter(args)?;
    let order = match args.sort.as_deref() {
        Some(sort) => sort.parse()?,
        None => ctx.config.default_sort,
    };

    let issues = select(ctx.store.iter(), &filter, order, args.limit);
    tracing::debug!(count = issues.len(), %order, "listed issues");

    if ctx.json {
        ctx.print_json(&issues)?;
    } else if issues.is_empty() {
        println!("No issues found.");
    } else {
        for issue in &issues {
            println!("{}", format_issue_line(issue));
        }
        println!("\n{} issue(s)", issues.len());
    }

    Ok(())
}

/// Filter, sort and cap.
fn select<'a, I>(
    issues: I,
    filter: &IssueFilter,
    order: SortOrder,
    limit: Option<usize>,
) -> Vec<&'a Issue>
where
    I: IntoIterator<Item = &'a Issue>,
{
    let mut selected = filter_issues(issues, filter);
    sort_issues(&mut selected, order);
    if let Some(limit) = limit {
        selected.truncate(limit);
    }
    selected
}

/// Convert CLI args to an issue filter. `all` or blank means no constraint.
fn build_filter(args: &ListArgs) -> Result<IssueFilter> {
    Ok(IssueFilter {
        status: parse_optional(args.status.as_deref())?,
        category: parse_optional(args.category.as_deref())?,
        priority: parse_optional(args.priority.as_deref())?,
        assignee: args.assignee.as_deref().and_then(AssigneeFilter::from_param),
        search: args.search.clone().filter(|s| !s.is_empty()),
    })
}

fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = civic_core::CivicError>,
{
    value.map_or(Ok(None), parse_dimension)
}
