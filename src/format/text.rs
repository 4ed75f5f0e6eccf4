//! Text formatting functions for `civic`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ◐ ● ✓)
//! - Priority and category badges
//! - Issue lines, detail blocks and the statistics summary

use std::fmt::Write;

use chrono::{DateTime, Utc};
use civic_core::stats::format_days;
use civic_core::{Action, Category, Issue, Priority, Statistics, Status};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display columns given to a title in one-line summaries.
pub const TITLE_WIDTH: usize = 48;

/// Status icon characters.
pub mod icons {
    /// Open - waiting for triage (hollow circle).
    pub const OPEN: &str = "○";
    /// In progress - crew assigned (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Resolved - awaiting citizen verification (filled circle).
    pub const RESOLVED: &str = "●";
    /// Closed - verified by the reporter (checkmark).
    pub const CLOSED: &str = "✓";
}

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::Open => icons::OPEN,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Resolved => icons::RESOLVED,
        Status::Closed => icons::CLOSED,
    }
}

/// Format priority as a bracketed badge, shouting when urgent.
#[must_use]
pub fn format_priority(priority: Priority) -> String {
    if priority.is_urgent() {
        format!("[{}]", priority.as_str().to_uppercase())
    } else {
        format!("[{}]", priority.as_str())
    }
}

/// Format category as a bracketed badge.
#[must_use]
pub fn format_category_badge(category: Category) -> String {
    format!("[{}]", category.as_str())
}

/// Cut `text` to at most `max_width` terminal columns, marking the cut with `…`.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {id} {priority} {category} {title}`
#[must_use]
pub fn format_issue_line(issue: &Issue) -> String {
    let mut line = format!(
        "{} {} {} {} {}",
        format_status_icon(issue.status),
        issue.id,
        format_priority(issue.priority),
        format_category_badge(issue.category),
        truncate_to_width(&issue.title, TITLE_WIDTH),
    );
    if let Some(name) = issue.assignee_name() {
        let _ = write!(line, " @{name}");
    }
    line
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Format the full detail block shown by `show`.
#[must_use]
pub fn format_issue_details(issue: &Issue, actions: &[Action]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}",
        format_status_icon(issue.status),
        issue.id,
        issue.title
    );
    let _ = writeln!(
        out,
        "Status: {}  Priority: {}  Category: {}",
        issue.status.label(),
        issue.priority.label(),
        issue.category.label()
    );
    let _ = writeln!(out, "Location: {}", issue.location.address);
    let _ = writeln!(
        out,
        "Reported by: {} <{}> on {}",
        issue.reported_by.name,
        issue.reported_by.email,
        format_timestamp(issue.created_at)
    );
    match &issue.assigned_to {
        Some(a) => {
            let _ = writeln!(out, "Assigned to: {} ({})", a.name, a.department);
        }
        None => {
            let _ = writeln!(out, "Assigned to: Unassigned");
        }
    }
    let _ = writeln!(out, "Updated: {}", format_timestamp(issue.updated_at));
    if let (Some(resolved_at), Some(elapsed)) = (issue.resolved_at, issue.resolution_time()) {
        let _ = writeln!(
            out,
            "Resolved: {} (after {})",
            format_timestamp(resolved_at),
            format_days(elapsed)
        );
    }
    if let Some(verification) = &issue.citizen_verification {
        let _ = write!(out, "Verification: {}", verification.status);
        if let Some(comment) = &verification.comment {
            let _ = write!(out, " \"{comment}\"");
        }
        out.push('\n');
    }
    if !issue.images.is_empty() {
        let _ = writeln!(out, "Photos: {}", issue.images.len());
    }
    if !actions.is_empty() {
        let labels: Vec<&str> = actions.iter().map(Action::label).collect();
        let _ = writeln!(out, "Actions: {}", labels.join(", "));
    }
    let _ = write!(out, "\n{}", issue.description);
    out
}

/// Format the dashboard summary shown by `stats`.
#[must_use]
pub fn format_statistics(stats: &Statistics) -> String {
    let average = stats
        .average_resolution_time()
        .map_or_else(|| "n/a".to_string(), format_days);
    let top = stats.most_common_category.map_or("n/a", |c| c.label());

    let rows = [
        ("Total issues:", stats.total_issues.to_string()),
        ("Open:", stats.open_issues.to_string()),
        ("In Progress:", stats.in_progress_issues.to_string()),
        ("Resolved:", stats.resolved_issues.to_string()),
        ("Closed:", stats.closed_issues.to_string()),
        ("Resolution rate:", format!("{}%", stats.resolution_rate)),
        ("Avg resolution:", average),
        ("Top category:", top.to_string()),
    ];
    rows.iter()
        .map(|(label, value)| format!("{label:<17}{value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
