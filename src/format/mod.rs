//! Output formatting for `civic`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! JSON goes to stdout; diagnostics go to stderr through `tracing`.
//!
//! # JSON Output Types
//!
//! - [`IssueDetails`] - Issue with resolution time and available actions (show)
//! - [`StatsSummary`] - Aggregate stats with display forms (stats)
//! - [`ReportReceipt`] - Stored issue and attempt count (report)

mod output;
mod text;

pub use output::{ActionView, IssueDetails, ReportReceipt, StatsSummary};
pub use text::{
    TITLE_WIDTH, format_category_badge, format_issue_details, format_issue_line,
    format_priority, format_statistics, format_status_icon, icons, truncate_to_width,
};
