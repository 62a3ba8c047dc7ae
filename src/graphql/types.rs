//! Wire types: the field mapping between stored documents and the
//! GraphQL schema.
//!
//! Conversion from the core model is where normalization happens:
//! dates become `Date` scalars and every comment is default-filled
//! through [`CommentRecord::normalize`].

use async_graphql::{Enum, ID, InputObject, MaybeUndefined, SimpleObject};
use chrono::Utc;

use trackd_core::model::{
    Comment, CommentRecord, DashboardStats, Issue, IssueUpdate, NewIssue, Priority, Status,
};

use super::scalar::Date;

/// Issue lifecycle status, snake_case on the wire.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "IssueStatus", rename_items = "snake_case")]
pub enum IssueStatus {
    Open,
    Closed,
    InProgress,
    Hold,
}

impl From<Status> for IssueStatus {
    fn from(value: Status) -> Self {
        match value {
            Status::Open => Self::Open,
            Status::Closed => Self::Closed,
            Status::InProgress => Self::InProgress,
            Status::Hold => Self::Hold,
        }
    }
}

impl From<IssueStatus> for Status {
    fn from(value: IssueStatus) -> Self {
        match value {
            IssueStatus::Open => Self::Open,
            IssueStatus::Closed => Self::Closed,
            IssueStatus::InProgress => Self::InProgress,
            IssueStatus::Hold => Self::Hold,
        }
    }
}

/// Issue priority, lowercase on the wire.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "IssuePriority", rename_items = "lowercase")]
pub enum IssuePriority {
    Low,
    Medium,
    High,
}

impl From<Priority> for IssuePriority {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Low => Self::Low,
            Priority::Medium => Self::Medium,
            Priority::High => Self::High,
        }
    }
}

impl From<IssuePriority> for Priority {
    fn from(value: IssuePriority) -> Self {
        match value {
            IssuePriority::Low => Self::Low,
            IssuePriority::Medium => Self::Medium,
            IssuePriority::High => Self::High,
        }
    }
}

/// A normalized comment.
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Comment")]
pub struct CommentPayload {
    pub id: ID,
    pub text: String,
    pub author: String,
    pub created_at: Date,
}

impl From<Comment> for CommentPayload {
    fn from(comment: Comment) -> Self {
        Self {
            id: ID(comment.id),
            text: comment.text,
            author: comment.author,
            created_at: Date(comment.created_at),
        }
    }
}

/// A normalized issue.
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Issue")]
pub struct IssuePayload {
    pub id: ID,
    pub title: String,
    pub description: String,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub assigned_to: String,
    pub tags: Vec<String>,
    pub due_date: Option<Date>,
    pub created_at: Date,
    pub updated_at: Date,
    pub comments: Vec<CommentPayload>,
}

impl From<Issue> for IssuePayload {
    fn from(issue: Issue) -> Self {
        // Fallback for comments stored without a timestamp.
        let now = Utc::now();
        Self {
            id: ID(issue.id),
            title: issue.title,
            description: issue.description,
            status: issue.status.into(),
            priority: issue.priority.into(),
            assigned_to: issue.assigned_to,
            tags: issue.tags,
            due_date: issue.due_date.map(Date),
            created_at: Date(issue.created_at),
            updated_at: Date(issue.updated_at),
            comments: issue
                .comments
                .iter()
                .map(|record| CommentRecord::normalize(record, now).into())
                .collect(),
        }
    }
}

/// Dashboard aggregate counts.
#[derive(SimpleObject, Debug, Clone, Copy)]
#[graphql(name = "DashboardStats")]
pub struct DashboardStatsPayload {
    pub total_issues: i64,
    pub open_issues: i64,
    pub closed_issues: i64,
    pub in_progress_issues: i64,
    pub hold_issues: i64,
    pub high_priority_issues: i64,
    pub medium_priority_issues: i64,
    pub low_priority_issues: i64,
}

impl From<DashboardStats> for DashboardStatsPayload {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_issues: stats.total_issues,
            open_issues: stats.open_issues,
            closed_issues: stats.closed_issues,
            in_progress_issues: stats.in_progress_issues,
            hold_issues: stats.hold_issues,
            high_priority_issues: stats.high_priority_issues,
            medium_priority_issues: stats.medium_priority_issues,
            low_priority_issues: stats.low_priority_issues,
        }
    }
}

/// Creation input. Status and priority fall back to model defaults.
#[derive(InputObject, Debug)]
#[graphql(name = "AddIssueInput")]
pub struct AddIssueInput {
    pub title: String,
    pub description: String,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub assigned_to: String,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<Date>,
}

impl AddIssueInput {
    pub fn into_new_issue(self) -> NewIssue {
        NewIssue {
            title: self.title,
            description: self.description,
            status: self.status.map(Status::from).unwrap_or_default(),
            priority: self.priority.map(Priority::from).unwrap_or_default(),
            assigned_to: self.assigned_to,
            tags: self.tags.unwrap_or_default(),
            due_date: self.due_date.map(|d| d.0),
        }
    }
}

/// Partial update input. Absent fields are untouched; an explicit
/// null dueDate clears it.
#[derive(InputObject, Debug)]
#[graphql(name = "UpdateIssueInput")]
pub struct UpdateIssueInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<IssueStatus>,
    pub priority: Option<IssuePriority>,
    pub assigned_to: Option<String>,
    pub tags: Option<Vec<String>>,
    pub due_date: MaybeUndefined<Date>,
}

impl UpdateIssueInput {
    pub fn into_update(self) -> IssueUpdate {
        IssueUpdate {
            title: self.title,
            description: self.description,
            status: self.status.map(Status::from),
            priority: self.priority.map(Priority::from),
            assigned_to: self.assigned_to,
            tags: self.tags,
            due_date: match self.due_date {
                MaybeUndefined::Undefined => None,
                MaybeUndefined::Null => Some(None),
                MaybeUndefined::Value(date) => Some(Some(date.0)),
            },
        }
    }
}
