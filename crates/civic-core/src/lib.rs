//! `civic-core`: in-memory civic issue tracking.
//!
//! Citizens report problems, authorities triage and resolve them, and
//! citizens confirm (or dispute) the fix. This crate holds the data side
//! of that loop: an owned issue store with copy-on-write snapshots, a
//! pure filter engine, the status machine with its role table, and
//! dashboard statistics.
//!
//! # Quick Start
//!
//! ```
//! use civic_core::{IssueFilter, IssueStore, Role, SortOrder, Status};
//! use civic_core::seed::sample_issues;
//!
//! let mut store = IssueStore::with_issues(sample_issues());
//!
//! // Query
//! let open = store.list(&IssueFilter::default().with_status(Status::Open), SortOrder::Newest);
//! assert_eq!(open.len(), 2);
//!
//! // Triage
//! store.transition("1", Status::InProgress, Role::Authority).unwrap();
//! store.transition("1", Status::Resolved, Role::Authority).unwrap();
//!
//! // Dashboard
//! assert_eq!(store.stats().resolution_rate, 60);
//! ```

pub mod error;
pub mod filter;
pub mod jsonl;
pub mod model;
pub mod policy;
pub mod query;
pub mod seed;
pub mod stats;
pub mod store;
pub mod submit;
pub mod transition;
pub mod util;

pub use error::{CivicError, Result, ValidationError};
pub use model::{
    Assignee, Category, CitizenVerification, Issue, IssueDraft, Location, Priority, Reporter,
    Status, VerificationStatus,
};
pub use policy::{Action, Role};
pub use query::{AssigneeFilter, IssueFilter, IssueUpdate, SortOrder};
pub use stats::Statistics;
pub use store::IssueStore;
pub use submit::{SubmitError, SubmitPolicy, Submission, SubmissionState, Submitter};
pub use transition::Transition;
