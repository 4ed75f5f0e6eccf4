//! In-memory issue store backed by a persistent vector.
//!
//! The store is the single owner of the authoritative issue list.
//! Writes never mutate a record in place: each one swaps in a new copy,
//! and because `im::Vector` shares structure between versions, a
//! [`snapshot`](IssueStore::snapshot) taken earlier keeps seeing the
//! list exactly as it was.

use chrono::Utc;
use im::Vector;

use crate::error::{CivicError, Result};
use crate::filter;
use crate::model::{Issue, IssueDraft, Status};
use crate::policy::{self, Role};
use crate::query::{IssueFilter, IssueUpdate, SortOrder};
use crate::stats::Statistics;
use crate::transition;
use crate::util::{IdGenerator, IdSeed, next_timestamp};

/// The authoritative issue list, newest first.
#[derive(Debug, Clone, Default)]
pub struct IssueStore {
    issues: Vector<Issue>,
    id_generator: IdGenerator,
}

impl IssueStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `issues` in the given order.
    #[must_use]
    pub fn with_issues(issues: impl IntoIterator<Item = Issue>) -> Self {
        Self {
            issues: issues.into_iter().collect(),
            id_generator: IdGenerator::default(),
        }
    }

    /// Set the ID prefix for new issues.
    pub fn set_id_prefix(&mut self, prefix: impl Into<String>) {
        self.id_generator = IdGenerator::with_prefix(prefix);
    }

    #[must_use]
    pub fn id_prefix(&self) -> &str {
        self.id_generator.prefix()
    }

    // ========================================================================
    // CRUD
    // ========================================================================

    /// Store a new issue at the front of the list.
    ///
    /// Assigns a fresh ID and sets `created_at == updated_at == now`.
    /// The draft is taken as already validated.
    pub fn add(&mut self, draft: IssueDraft) -> Issue {
        let now = Utc::now();
        let seed = IdSeed {
            title: &draft.title,
            reporter: &draft.reported_by.name,
            created_at: now,
        };
        let id = self
            .id_generator
            .generate(&seed, self.issues.len(), |candidate| self.contains(candidate));

        let issue = Issue::from_draft(id, draft, now);
        tracing::debug!(id = %issue.id, category = %issue.category, "issue added");
        self.issues.push_front(issue.clone());
        issue
    }

    /// Merge `update` into an existing issue and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist, or
    /// `Validation` if the update would blank the title or description.
    /// The list is unchanged on error.
    pub fn update(&mut self, id: &str, update: &IssueUpdate) -> Result<Issue> {
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(CivicError::validation("title", "cannot be empty"));
        }
        if update
            .description
            .as_deref()
            .is_some_and(|d| d.trim().is_empty())
        {
            return Err(CivicError::validation("description", "cannot be empty"));
        }

        let index = self.index_of(id)?;
        let mut next = self.issues[index].clone();
        update.apply_to(&mut next);
        next.updated_at = next_timestamp(next.updated_at, Utc::now());

        tracing::debug!(id, "issue updated");
        self.issues.set(index, next.clone());
        Ok(next)
    }

    /// Delete an issue from the store, returning it.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist.
    pub fn remove(&mut self, id: &str) -> Result<Issue> {
        let index = self.index_of(id)?;
        tracing::debug!(id, "issue removed");
        Ok(self.issues.remove(index))
    }

    /// Look up an issue by ID.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    /// Get a single issue by ID.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist.
    pub fn get(&self, id: &str) -> Result<&Issue> {
        self.get_by_id(id)
            .ok_or_else(|| CivicError::IssueNotFound { id: id.to_string() })
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get_by_id(id).is_some()
    }

    // ========================================================================
    // Lifecycle actions
    // ========================================================================

    /// Move an issue to `to` on behalf of `role`.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound`, or whatever [`policy::authorize`] and
    /// [`transition::apply`] reject. The list is unchanged on error.
    pub fn transition(&mut self, id: &str, to: Status, role: Role) -> Result<Issue> {
        let index = self.index_of(id)?;
        let current = &self.issues[index];
        policy::authorize(role, current, to)?;
        let now = next_timestamp(current.updated_at, Utc::now());
        let next = transition::apply(current, to, now)?;
        self.issues.set(index, next.clone());
        Ok(next)
    }

    /// Citizen "verify fixed", with an optional comment.
    ///
    /// # Errors
    ///
    /// As [`IssueStore::transition`] for a citizen closing the issue.
    pub fn verify(&mut self, id: &str, comment: Option<&str>) -> Result<Issue> {
        let index = self.index_of(id)?;
        let current = &self.issues[index];
        policy::authorize(Role::Citizen, current, Status::Closed)?;
        let now = next_timestamp(current.updated_at, Utc::now());
        let next = transition::verify(current, comment, now)?;
        self.issues.set(index, next.clone());
        Ok(next)
    }

    /// Citizen dispute of a resolution.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` or `VerificationNotPending`.
    pub fn dispute(&mut self, id: &str, comment: Option<&str>) -> Result<Issue> {
        let index = self.index_of(id)?;
        let current = &self.issues[index];
        let now = next_timestamp(current.updated_at, Utc::now());
        let next = transition::dispute(current, comment, now)?;
        tracing::debug!(id, "resolution disputed");
        self.issues.set(index, next.clone());
        Ok(next)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// A read-only view of the current list. Later writes to the store
    /// are not visible through it.
    #[must_use]
    pub fn snapshot(&self) -> Vector<Issue> {
        self.issues.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    /// Filter, then sort.
    #[must_use]
    pub fn list(&self, filter: &IssueFilter, order: SortOrder) -> Vec<&Issue> {
        let mut results = filter::filter_issues(&self.issues, filter);
        filter::sort_issues(&mut results, order);
        results
    }

    #[must_use]
    pub fn stats(&self) -> Statistics {
        Statistics::compute(&self.issues)
    }

    #[must_use]
    pub fn urgent(&self) -> Vec<&Issue> {
        filter::urgent_issues(&self.issues)
    }

    #[must_use]
    pub fn assignee_names(&self) -> Vec<&str> {
        filter::assignee_names(&self.issues)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn index_of(&self, id: &str) -> Result<usize> {
        self.issues
            .iter()
            .position(|issue| issue.id == id)
            .ok_or_else(|| CivicError::IssueNotFound { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Location, Reporter, VerificationStatus};
    use crate::seed::sample_issues;

    fn make_draft(title: &str) -> IssueDraft {
        IssueDraft::new(
            title,
            "Something is broken",
            Category::Infrastructure,
            Location::from_coordinates(40.7128, -74.0060),
            Reporter {
                id: "user9".to_string(),
                name: "Ada Citizen".to_string(),
                email: "ada@example.org".to_string(),
            },
        )
    }

    fn sample_store() -> IssueStore {
        IssueStore::with_issues(sample_issues())
    }

    #[test]
    fn test_add_and_get() {
        let mut store = IssueStore::new();
        let created = store.add(make_draft("Test issue"));
        assert!(created.id.starts_with("civ-"));
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(created.status, Status::Open);

        let fetched = store.get(&created.id).unwrap();
        assert_eq!(fetched.title, "Test issue");
    }

    #[test]
    fn test_add_prepends() {
        let mut store = sample_store();
        let created = store.add(make_draft("Newest"));
        assert_eq!(store.len(), 6);
        assert_eq!(store.iter().next().unwrap().id, created.id);
    }

    #[test]
    fn test_add_uses_prefix() {
        let mut store = IssueStore::new();
        store.set_id_prefix("nyc");
        let created = store.add(make_draft("Prefixed"));
        assert!(created.id.starts_with("nyc-"));
        assert_eq!(store.id_prefix(), "nyc");
    }

    #[test]
    fn test_update_issue() {
        let mut store = sample_store();
        let before = store.get("2").unwrap().clone();
        let update = IssueUpdate {
            title: Some("Broken Streetlight (2 poles)".to_string()),
            priority: Some(crate::model::Priority::High),
            ..Default::default()
        };
        let updated = store.update("2", &update).unwrap();
        assert_eq!(updated.title, "Broken Streetlight (2 poles)");
        assert!(updated.updated_at > before.updated_at);
        assert_eq!(updated.created_at, before.created_at);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_update_nonexistent_leaves_list_unchanged() {
        let mut store = sample_store();
        let before = store.snapshot();
        let update = IssueUpdate {
            title: Some("X".to_string()),
            ..Default::default()
        };
        let result = store.update("999", &update);
        assert!(matches!(result, Err(CivicError::IssueNotFound { .. })));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_update_leaves_lifecycle_fields_alone() {
        let mut store = sample_store();
        let before = store.get("3").unwrap().clone();
        let update = IssueUpdate {
            title: Some("Overflowing Trash Bins".to_string()),
            category: Some(Category::Environment),
            priority: Some(crate::model::Priority::Low),
            location: Some(Location::from_coordinates(40.0, -73.0)),
            assigned_to: Some(None),
            images: Some(Vec::new()),
            ..Default::default()
        };
        let updated = store.update("3", &update).unwrap();
        assert_eq!(updated.status, before.status);
        assert_eq!(updated.resolved_at, before.resolved_at);
        assert_eq!(updated.citizen_verification, before.citizen_verification);

        // Closing still has to go through the status machine.
        assert!(matches!(
            store.transition("1", Status::Closed, Role::Admin),
            Err(CivicError::InvalidTransition { .. })
        ));
        assert_eq!(store.get("1").unwrap().status, Status::Open);
    }

    #[test]
    fn test_add_ignores_lifecycle_fields_in_draft_json() {
        let json = r#"{
            "title": "Fallen sign",
            "description": "Stop sign knocked over",
            "category": "safety",
            "status": "closed",
            "resolvedAt": "2024-01-12T10:00:00Z",
            "citizenVerification": {"status": "verified"},
            "location": {"lat": 40.7, "lng": -73.9, "address": "Corner"},
            "reportedBy": {"id": "u1", "name": "Ada", "email": "ada@example.org"}
        }"#;
        let draft: IssueDraft = serde_json::from_str(json).unwrap();

        let mut store = IssueStore::new();
        let created = store.add(draft);
        assert_eq!(created.status, Status::Open);
        assert!(created.resolved_at.is_none());
        assert!(created.citizen_verification.is_none());
    }

    #[test]
    fn test_update_empty_title_rejected() {
        let mut store = sample_store();
        let update = IssueUpdate {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update("1", &update),
            Err(CivicError::Validation { .. })
        ));
    }

    #[test]
    fn test_remove_issue() {
        let mut store = sample_store();
        let removed = store.remove("4").unwrap();
        assert_eq!(removed.id, "4");
        assert_eq!(store.len(), 4);
        assert!(store.get_by_id("4").is_none());
        assert!(matches!(
            store.remove("4"),
            Err(CivicError::IssueNotFound { .. })
        ));
    }

    #[test]
    fn test_snapshot_is_stable_across_writes() {
        let mut store = sample_store();
        let snapshot = store.snapshot();
        store
            .transition("1", Status::InProgress, Role::Authority)
            .unwrap();
        store.add(make_draft("Later"));
        store.remove("5").unwrap();

        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot[0].status, Status::Open);
        assert!(snapshot.iter().any(|i| i.id == "5"));
        assert_eq!(store.get("1").unwrap().status, Status::InProgress);
    }

    #[test]
    fn test_transition_open_to_resolved_via_in_progress() {
        let mut store = sample_store();
        store
            .transition("1", Status::InProgress, Role::Authority)
            .unwrap();
        let resolved = store
            .transition("1", Status::Resolved, Role::Authority)
            .unwrap();
        assert!(resolved.resolved_at.is_some());
        assert_eq!(
            resolved.verification_status(),
            Some(VerificationStatus::Pending)
        );
        assert!(resolved.updated_at >= resolved.created_at);
    }

    #[test]
    fn test_transition_permission_denied_leaves_issue() {
        let mut store = sample_store();
        let before = store.get("1").unwrap().clone();
        let err = store
            .transition("1", Status::InProgress, Role::Citizen)
            .unwrap_err();
        assert!(matches!(err, CivicError::PermissionDenied { .. }));
        assert_eq!(store.get("1").unwrap(), &before);
    }

    #[test]
    fn test_transition_unknown_issue() {
        let mut store = sample_store();
        assert!(matches!(
            store.transition("nope", Status::Resolved, Role::Admin),
            Err(CivicError::IssueNotFound { .. })
        ));
    }

    #[test]
    fn test_verify_and_dispute() {
        let mut store = sample_store();
        let mut other = store.clone();

        let closed = store.verify("3", Some("Clean now")).unwrap();
        assert_eq!(closed.status, Status::Closed);
        assert_eq!(
            closed.verification_status(),
            Some(VerificationStatus::Verified)
        );

        let disputed = other.dispute("3", Some("Still smells")).unwrap();
        assert_eq!(disputed.status, Status::Resolved);
        assert!(matches!(
            other.verify("3", None),
            Err(CivicError::VerificationNotPending { .. })
        ));
    }

    #[test]
    fn test_disputed_issue_can_be_reopened_and_fixed_again() {
        let mut store = sample_store();
        store.dispute("3", Some("Still smells")).unwrap();

        let reopened = store.transition("3", Status::Open, Role::Citizen).unwrap();
        assert_eq!(reopened.status, Status::Open);
        assert_eq!(
            reopened.verification_status(),
            Some(VerificationStatus::Disputed)
        );

        store
            .transition("3", Status::InProgress, Role::Authority)
            .unwrap();
        let resolved = store
            .transition("3", Status::Resolved, Role::Authority)
            .unwrap();
        assert_eq!(
            resolved.verification_status(),
            Some(VerificationStatus::Pending)
        );

        let closed = store.verify("3", Some("Fixed for real")).unwrap();
        assert_eq!(closed.status, Status::Closed);
    }

    #[test]
    fn test_list_filters_and_sorts() {
        let store = sample_store();
        let filter = IssueFilter::default().with_status(Status::Open);
        let ids: Vec<&str> = store
            .list(&filter, SortOrder::Newest)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "5"]);
    }

    #[test]
    fn test_stats_follow_writes() {
        let mut store = sample_store();
        assert_eq!(store.stats().resolution_rate, 40);
        store
            .transition("2", Status::Resolved, Role::Authority)
            .unwrap();
        let stats = store.stats();
        assert_eq!(stats.resolved_issues, 2);
        assert_eq!(stats.resolution_rate, 60);
    }

    #[test]
    fn test_urgent_and_assignees() {
        let store = sample_store();
        let urgent: Vec<&str> = store.urgent().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(urgent, vec!["1"]);
        assert_eq!(
            store.assignee_names(),
            vec!["Mike Rodriguez", "David Chen", "Lisa Thompson"]
        );
    }
}
