//! Core data types for trackd.
//!
//! Serde field forms match the stored document shape (snake_case enum
//! values); the GraphQL layer owns the camelCase wire renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Author substituted when a stored comment has none.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Issue lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Open,
    Closed,
    InProgress,
    Hold,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::InProgress => "in_progress",
            Self::Hold => "hold",
        }
    }

    /// All statuses, in dashboard order.
    pub const ALL: [Self; 4] = [Self::Open, Self::Closed, Self::InProgress, Self::Hold];
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = crate::error::TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "in_progress" | "inprogress" => Ok(Self::InProgress),
            "hold" => Ok(Self::Hold),
            other => Err(crate::error::TrackError::validation(
                "status",
                format!("unknown status '{other}'"),
            )),
        }
    }
}

/// Issue priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = crate::error::TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(crate::error::TrackError::validation(
                "priority",
                format!("unknown priority '{other}'"),
            )),
        }
    }
}

/// The primary issue entity, as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    /// Store-assigned unique ID, immutable after creation.
    pub id: String,

    /// Title, required non-empty.
    pub title: String,

    /// Detailed description, required non-empty.
    pub description: String,

    /// Workflow status.
    #[serde(default)]
    pub status: Status,

    /// Priority.
    #[serde(default)]
    pub priority: Priority,

    /// Assigned user, required non-empty.
    pub assigned_to: String,

    /// Free-form labels.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Creation timestamp, set once.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp, refreshed on every mutation.
    pub updated_at: DateTime<Utc>,

    /// Comment thread, append-only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<CommentRecord>,
}

/// A comment as stored on its parent issue.
///
/// Legacy documents may lack text, author, or timestamp; the fields
/// stay optional here and [`CommentRecord::normalize`] fills the
/// defaults before anything reaches the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CommentRecord {
    /// Unique within the parent issue, assigned at append time.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CommentRecord {
    /// Default-fill missing fields.
    ///
    /// `fallback` stands in for a missing timestamp (render-time clock
    /// at the call site).
    #[must_use]
    pub fn normalize(&self, fallback: DateTime<Utc>) -> Comment {
        Comment {
            id: self.id.clone(),
            text: self.text.clone().unwrap_or_default(),
            author: self
                .author
                .clone()
                .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
            created_at: self.created_at.unwrap_or(fallback),
        }
    }
}

/// A normalized comment: no missing fields remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new issue. The store assigns id and
/// timestamps; the comment thread starts empty.
#[derive(Debug, Clone, Default)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub assigned_to: String,
    pub tags: Vec<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update; `None` fields are left unchanged.
///
/// Last-write-wins, no concurrency check.
#[derive(Debug, Clone, Default)]
pub struct IssueUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Aggregate counts for the dashboard query.
///
/// Computed in a single pass over the collection; the counts are
/// mutually consistent within that pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_issues: i64,
    pub open_issues: i64,
    pub closed_issues: i64,
    pub in_progress_issues: i64,
    pub hold_issues: i64,
    pub high_priority_issues: i64,
    pub medium_priority_issues: i64,
    pub low_priority_issues: i64,
}

impl DashboardStats {
    /// Tally one issue into the counts.
    pub fn record(&mut self, status: Status, priority: Priority) {
        self.total_issues += 1;
        match status {
            Status::Open => self.open_issues += 1,
            Status::Closed => self.closed_issues += 1,
            Status::InProgress => self.in_progress_issues += 1,
            Status::Hold => self.hold_issues += 1,
        }
        match priority {
            Priority::High => self.high_priority_issues += 1,
            Priority::Medium => self.medium_priority_issues += 1,
            Priority::Low => self.low_priority_issues += 1,
        }
    }
}
