//! Dashboard statistics, recomputed from the issue list on every read.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::model::{Category, Issue, Status};

/// Aggregate counts and rates for a set of issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_issues: usize,
    pub open_issues: usize,
    pub in_progress_issues: usize,
    pub resolved_issues: usize,
    pub closed_issues: usize,
    /// Whole percent of issues that are resolved or closed.
    pub resolution_rate: u32,
    /// Mean of `resolved_at - created_at` over resolved and closed
    /// issues, in whole seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_resolution_secs: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_common_category: Option<Category>,
}

impl Statistics {
    /// Compute statistics over `issues`.
    pub fn compute<'a, I>(issues: I) -> Self
    where
        I: IntoIterator<Item = &'a Issue>,
    {
        let mut counts = [0_usize; 4];
        let mut category_counts = [0_usize; 5];
        let mut resolution_total = 0_i64;
        let mut resolution_count = 0_i64;

        for issue in issues {
            counts[status_index(issue.status)] += 1;
            category_counts[category_index(issue.category)] += 1;
            // A reopened issue keeps its old resolved_at but is not resolved now.
            if let Some(elapsed) = issue
                .resolution_time()
                .filter(|_| issue.status.is_resolved())
            {
                resolution_total += elapsed.num_seconds();
                resolution_count += 1;
            }
        }

        let [open, in_progress, resolved, closed] = counts;
        let total = counts.iter().sum();

        Self {
            total_issues: total,
            open_issues: open,
            in_progress_issues: in_progress,
            resolved_issues: resolved,
            closed_issues: closed,
            resolution_rate: resolution_rate(resolved + closed, total),
            average_resolution_secs: (resolution_count > 0)
                .then(|| resolution_total / resolution_count),
            most_common_category: most_common(&category_counts),
        }
    }

    #[must_use]
    pub const fn count(&self, status: Status) -> usize {
        match status {
            Status::Open => self.open_issues,
            Status::InProgress => self.in_progress_issues,
            Status::Resolved => self.resolved_issues,
            Status::Closed => self.closed_issues,
        }
    }

    #[must_use]
    pub fn average_resolution_time(&self) -> Option<Duration> {
        self.average_resolution_secs.map(Duration::seconds)
    }
}

/// `round(100 * done / total)`, 0 for an empty set. Halves round up.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn resolution_rate(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // Integer form of floor(x + 0.5).
    ((200 * done + total) / (2 * total)) as u32
}

/// Render a duration the way the dashboard shows it: `"3.2 days"`.
#[must_use]
pub fn format_days(duration: Duration) -> String {
    let days = duration.num_seconds() as f64 / 86_400.0;
    format!("{days:.1} days")
}

const fn status_index(status: Status) -> usize {
    match status {
        Status::Open => 0,
        Status::InProgress => 1,
        Status::Resolved => 2,
        Status::Closed => 3,
    }
}

const fn category_index(category: Category) -> usize {
    match category {
        Category::Infrastructure => 0,
        Category::Sanitation => 1,
        Category::Safety => 2,
        Category::Environment => 3,
        Category::Transportation => 4,
    }
}

/// Highest count wins; ties go to the earlier category.
fn most_common(counts: &[usize; 5]) -> Option<Category> {
    let mut best: Option<(Category, usize)> = None;
    for category in Category::ALL {
        let count = counts[category_index(category)];
        if count > 0 && best.is_none_or(|(_, n)| count > n) {
            best = Some((category, count));
        }
    }
    best.map(|(category, _)| category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_issues;

    #[test]
    fn test_sample_statistics() {
        let issues = sample_issues();
        let stats = Statistics::compute(&issues);
        assert_eq!(stats.total_issues, 5);
        assert_eq!(stats.open_issues, 2);
        assert_eq!(stats.in_progress_issues, 1);
        assert_eq!(stats.resolved_issues, 1);
        assert_eq!(stats.closed_issues, 1);
        assert_eq!(stats.resolution_rate, 40);
        assert_eq!(stats.count(Status::Open), 2);
    }

    #[test]
    fn test_sample_average_resolution_time() {
        let stats = Statistics::compute(&sample_issues());
        // (3d 4h45m + 3d 5h05m) / 2 = 3d 4h55m
        let expected = Duration::days(3) + Duration::hours(4) + Duration::minutes(55);
        assert_eq!(stats.average_resolution_time(), Some(expected));
        assert_eq!(format_days(expected), "3.2 days");
    }

    #[test]
    fn test_average_resolution_skips_reopened_issues() {
        let mut issues = sample_issues();
        let before = Statistics::compute(&issues).average_resolution_secs;

        // Issue 1 was resolved once and reopened: resolved_at is stale.
        issues[0].resolved_at = Some(issues[0].created_at + Duration::days(30));
        assert_eq!(issues[0].status, Status::Open);
        assert_eq!(Statistics::compute(&issues).average_resolution_secs, before);

        issues.retain(|i| !i.status.is_resolved());
        issues[0].resolved_at = Some(issues[0].created_at + Duration::days(1));
        assert_eq!(Statistics::compute(&issues).average_resolution_time(), None);
    }

    #[test]
    fn test_most_common_category_tie_breaks_by_order() {
        let stats = Statistics::compute(&sample_issues());
        assert_eq!(stats.most_common_category, Some(Category::Infrastructure));

        let mut issues = sample_issues();
        issues[0].category = Category::Safety;
        let stats = Statistics::compute(&issues);
        assert_eq!(stats.most_common_category, Some(Category::Safety));
    }

    #[test]
    fn test_empty_statistics() {
        let stats = Statistics::compute(&Vec::<Issue>::new());
        assert_eq!(stats.total_issues, 0);
        assert_eq!(stats.resolution_rate, 0);
        assert_eq!(stats.average_resolution_secs, None);
        assert_eq!(stats.most_common_category, None);
    }

    #[test]
    fn test_resolution_rate_rounding() {
        assert_eq!(resolution_rate(0, 0), 0);
        assert_eq!(resolution_rate(1, 3), 33);
        assert_eq!(resolution_rate(2, 3), 67);
        assert_eq!(resolution_rate(1, 8), 13); // 12.5 rounds up
        assert_eq!(resolution_rate(5, 5), 100);
    }

    #[test]
    fn test_statistics_json_shape() {
        let stats = Statistics::compute(&sample_issues());
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalIssues"], 5);
        assert_eq!(value["resolutionRate"], 40);
        assert_eq!(value["mostCommonCategory"], "infrastructure");
    }
}
