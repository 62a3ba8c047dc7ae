//! The store seam and its in-memory implementation.
//!
//! [`IssueStore`] is the contract every persistence backend fulfils.
//! [`MemoryStore`] keeps everything in a `HashMap` behind an async
//! lock; it backs the resolver tests and fixes the reference
//! semantics for the operations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::model::{CommentRecord, DashboardStats, Issue, IssueUpdate, NewIssue};

/// Document-store contract for issues.
///
/// Each call is a fresh round trip; there is no caching and no
/// cross-call transaction. `append_comment` is read-modify-write and
/// relies only on single-document atomicity.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// All issues, unfiltered and unpaginated.
    async fn list_issues(&self) -> Result<Vec<Issue>>;

    /// Single issue lookup; `Ok(None)` when absent.
    ///
    /// Backends with a structured id format return `InvalidId` for
    /// ids that cannot possibly name a document.
    async fn get_issue(&self, id: &str) -> Result<Option<Issue>>;

    /// Persist a new issue with store-assigned id and timestamps.
    async fn create_issue(&self, new: NewIssue) -> Result<Issue>;

    /// Partial field merge; refreshes `updated_at`. `Ok(None)` when
    /// no issue matches. Last write wins.
    async fn update_issue(&self, id: &str, update: IssueUpdate) -> Result<Option<Issue>>;

    /// Remove an issue. Deleting an absent id is not an error.
    async fn delete_issue(&self, id: &str) -> Result<()>;

    /// Append a comment (already validated and trimmed) and persist
    /// the whole issue. `Ok(None)` when the issue does not exist.
    async fn append_comment(&self, issue_id: &str, text: &str, author: &str)
    -> Result<Option<Issue>>;

    /// Aggregate counts over the full collection, single pass.
    async fn dashboard_stats(&self) -> Result<DashboardStats>;
}

#[derive(Default)]
struct MemoryInner {
    issues: HashMap<String, Issue>,
    next_issue_id: u64,
    next_comment_id: u64,
}

impl MemoryInner {
    fn issue_id(&mut self) -> String {
        self.next_issue_id += 1;
        // 24 hex chars, same width as a Mongo ObjectId.
        format!("{:024x}", self.next_issue_id)
    }

    fn comment_id(&mut self) -> String {
        self.next_comment_id += 1;
        format!("{:024x}", self.next_comment_id)
    }
}

/// In-memory issue store.
///
/// All data lives in memory; nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an issue as-is, keeping its id and timestamps.
    ///
    /// For loading pre-existing documents (fixtures, imports); normal
    /// creation goes through [`IssueStore::create_issue`].
    pub async fn insert(&self, issue: Issue) {
        let mut inner = self.inner.write().await;
        inner.issues.insert(issue.id.clone(), issue);
    }

    /// Total number of issues.
    pub async fn len(&self) -> usize {
        self.inner.read().await.issues.len()
    }

    /// True when no issues are stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.issues.is_empty()
    }
}

#[async_trait]
impl IssueStore for MemoryStore {
    async fn list_issues(&self) -> Result<Vec<Issue>> {
        let inner = self.inner.read().await;
        let mut issues: Vec<Issue> = inner.issues.values().cloned().collect();
        issues.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(issues)
    }

    async fn get_issue(&self, id: &str) -> Result<Option<Issue>> {
        let inner = self.inner.read().await;
        Ok(inner.issues.get(id).cloned())
    }

    async fn create_issue(&self, new: NewIssue) -> Result<Issue> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let issue = Issue {
            id: inner.issue_id(),
            title: new.title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            assigned_to: new.assigned_to,
            tags: new.tags,
            due_date: new.due_date,
            created_at: now,
            updated_at: now,
            comments: Vec::new(),
        };
        inner.issues.insert(issue.id.clone(), issue.clone());
        Ok(issue)
    }

    async fn update_issue(&self, id: &str, update: IssueUpdate) -> Result<Option<Issue>> {
        let mut inner = self.inner.write().await;
        let Some(issue) = inner.issues.get_mut(id) else {
            return Ok(None);
        };

        if let Some(title) = update.title {
            issue.title = title;
        }
        if let Some(description) = update.description {
            issue.description = description;
        }
        if let Some(status) = update.status {
            issue.status = status;
        }
        if let Some(priority) = update.priority {
            issue.priority = priority;
        }
        if let Some(assigned_to) = update.assigned_to {
            issue.assigned_to = assigned_to;
        }
        if let Some(tags) = update.tags {
            issue.tags = tags;
        }
        if let Some(due_date) = update.due_date {
            issue.due_date = due_date;
        }
        issue.updated_at = Utc::now();

        Ok(Some(issue.clone()))
    }

    async fn delete_issue(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.issues.remove(id);
        Ok(())
    }

    async fn append_comment(
        &self,
        issue_id: &str,
        text: &str,
        author: &str,
    ) -> Result<Option<Issue>> {
        let mut inner = self.inner.write().await;
        if !inner.issues.contains_key(issue_id) {
            return Ok(None);
        }
        let comment = CommentRecord {
            id: inner.comment_id(),
            text: Some(text.to_string()),
            author: Some(author.to_string()),
            created_at: Some(Utc::now()),
        };
        let Some(issue) = inner.issues.get_mut(issue_id) else {
            return Ok(None);
        };
        issue.comments.push(comment);
        issue.updated_at = Utc::now();
        Ok(Some(issue.clone()))
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let inner = self.inner.read().await;
        let mut stats = DashboardStats::default();
        for issue in inner.issues.values() {
            stats.record(issue.status, issue.priority);
        }
        Ok(stats)
    }
}
