use civic_core::stats::format_days;
use civic_core::{Action, Issue, Statistics, Status};
use serde::{Deserialize, Serialize};

/// A button the current role could press, with the status it leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionView {
    pub action: Action,
    pub label: String,
    pub target: Status,
}

impl From<Action> for ActionView {
    fn from(action: Action) -> Self {
        Self {
            action,
            label: action.label().to_string(),
            target: action.target(),
        }
    }
}

/// Issue details for the show view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDetails {
    #[serde(flatten)]
    pub issue: Issue,
    /// Human-readable time to resolution, e.g. `"3.2 days"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_time: Option<String>,
    pub actions: Vec<ActionView>,
}

impl IssueDetails {
    #[must_use]
    pub fn new(issue: Issue, actions: &[Action]) -> Self {
        Self {
            resolution_time: issue.resolution_time().map(format_days),
            actions: actions.iter().copied().map(ActionView::from).collect(),
            issue,
        }
    }
}

/// Dashboard numbers plus their display forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    #[serde(flatten)]
    pub stats: Statistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_resolution_time: Option<String>,
}

impl From<Statistics> for StatsSummary {
    fn from(stats: Statistics) -> Self {
        Self {
            average_resolution_time: stats.average_resolution_time().map(format_days),
            stats,
        }
    }
}

/// Outcome of a successful `report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportReceipt {
    pub issue: Issue,
    pub attempts: u32,
    /// Photos beyond the per-report limit that were not attached.
    pub dropped_images: usize,
}
