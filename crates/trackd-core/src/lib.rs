//! `trackd-core` — Issue tracking model and store seam.
//!
//! Database-free core of the trackd GraphQL API: the data model,
//! error taxonomy, presence validation, the [`IssueStore`] contract,
//! and an in-memory implementation of it.
//!
//! # Quick Start
//!
//! ```no_run
//! use trackd_core::{IssueStore, MemoryStore};
//! use trackd_core::model::NewIssue;
//!
//! # async fn demo() {
//! let store = MemoryStore::new();
//! let issue = store
//!     .create_issue(NewIssue {
//!         title: "New task".into(),
//!         description: "details".into(),
//!         assigned_to: "agent".into(),
//!         ..Default::default()
//!     })
//!     .await
//!     .unwrap();
//! assert!(issue.comments.is_empty());
//! # }
//! ```

pub mod error;
pub mod model;
pub mod store;
pub mod validation;

pub use error::{FieldError, Result, TrackError};
pub use model::{Comment, CommentRecord, DashboardStats, Issue, IssueUpdate, NewIssue, Priority, Status};
pub use store::{IssueStore, MemoryStore};
pub use validation::IssueValidator;
