//! MongoDB document store backend.
//!
//! Stored documents keep the collection's historical field names
//! (`assignedTo`, `dueDate`, `createdAt`, `updatedAt`, subdocument
//! `_id`s); [`IssueDoc`] and [`CommentDoc`] carry that shape and are
//! mapped to the core model at the boundary.

use async_trait::async_trait;
use bson::{Bson, DateTime as BsonDateTime, Document, doc, oid::ObjectId};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use trackd_core::error::{Result, TrackError};
use trackd_core::model::{
    CommentRecord, DashboardStats, Issue, IssueUpdate, NewIssue, Priority, Status,
};
use trackd_core::store::IssueStore;

const COLLECTION: &str = "issues";

/// Issue document as stored in MongoDB.
#[derive(Debug, Serialize, Deserialize)]
struct IssueDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    description: String,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    priority: Priority,
    #[serde(rename = "assignedTo")]
    assigned_to: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(rename = "dueDate", default, skip_serializing_if = "Option::is_none")]
    due_date: Option<BsonDateTime>,
    #[serde(rename = "createdAt")]
    created_at: BsonDateTime,
    #[serde(rename = "updatedAt")]
    updated_at: BsonDateTime,
    #[serde(default)]
    comments: Vec<CommentDoc>,
}

/// Embedded comment subdocument. Text, author, and timestamp stay
/// optional: legacy documents may lack any of them.
#[derive(Debug, Serialize, Deserialize)]
struct CommentDoc {
    #[serde(rename = "_id", default = "ObjectId::new")]
    id: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    created_at: Option<BsonDateTime>,
}

impl From<CommentDoc> for CommentRecord {
    fn from(doc: CommentDoc) -> Self {
        Self {
            id: doc.id.to_hex(),
            text: doc.text,
            author: doc.author,
            created_at: doc.created_at.map(BsonDateTime::to_chrono),
        }
    }
}

impl From<IssueDoc> for Issue {
    fn from(doc: IssueDoc) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            description: doc.description,
            status: doc.status,
            priority: doc.priority,
            assigned_to: doc.assigned_to,
            tags: doc.tags,
            due_date: doc.due_date.map(BsonDateTime::to_chrono),
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
            comments: doc.comments.into_iter().map(CommentRecord::from).collect(),
        }
    }
}

/// MongoDB-backed issue store.
pub struct MongoStore {
    issues: Collection<IssueDoc>,
}

impl MongoStore {
    /// Connect to the deployment and verify it with a ping.
    ///
    /// The caller treats a failure here as fatal; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns `Storage` wrapping the driver's message.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(TrackError::storage)?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(TrackError::storage)?;

        Ok(Self {
            issues: db.collection(COLLECTION),
        })
    }

    fn object_id(id: &str) -> Result<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| TrackError::InvalidId { id: id.to_string() })
    }
}

/// Read a count out of an aggregation row; `$sum` yields Int32 or
/// Int64 depending on the server.
fn count_field(row: &Document, key: &str) -> i64 {
    match row.get(key) {
        Some(Bson::Int32(n)) => i64::from(*n),
        Some(Bson::Int64(n)) => *n,
        _ => 0,
    }
}

fn status_count(status: Status) -> Bson {
    Bson::from(doc! {
        "$sum": { "$cond": [{ "$eq": ["$status", status.as_str()] }, 1, 0] }
    })
}

fn priority_count(priority: Priority) -> Bson {
    Bson::from(doc! {
        "$sum": { "$cond": [{ "$eq": ["$priority", priority.as_str()] }, 1, 0] }
    })
}

#[async_trait]
impl IssueStore for MongoStore {
    async fn list_issues(&self) -> Result<Vec<Issue>> {
        let cursor = self
            .issues
            .find(doc! {})
            .await
            .map_err(TrackError::storage)?;
        let docs: Vec<IssueDoc> = cursor.try_collect().await.map_err(TrackError::storage)?;
        Ok(docs.into_iter().map(Issue::from).collect())
    }

    async fn get_issue(&self, id: &str) -> Result<Option<Issue>> {
        let oid = Self::object_id(id)?;
        let doc = self
            .issues
            .find_one(doc! { "_id": oid })
            .await
            .map_err(TrackError::storage)?;
        Ok(doc.map(Issue::from))
    }

    async fn create_issue(&self, new: NewIssue) -> Result<Issue> {
        let now = BsonDateTime::from_chrono(Utc::now());
        let doc = IssueDoc {
            id: ObjectId::new(),
            title: new.title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            assigned_to: new.assigned_to,
            tags: new.tags,
            due_date: new.due_date.map(BsonDateTime::from_chrono),
            created_at: now,
            updated_at: now,
            comments: Vec::new(),
        };
        self.issues
            .insert_one(&doc)
            .await
            .map_err(TrackError::storage)?;
        Ok(doc.into())
    }

    async fn update_issue(&self, id: &str, update: IssueUpdate) -> Result<Option<Issue>> {
        let oid = Self::object_id(id)?;

        let mut set = doc! {};
        if let Some(title) = update.title {
            set.insert("title", title);
        }
        if let Some(description) = update.description {
            set.insert("description", description);
        }
        if let Some(status) = update.status {
            set.insert("status", status.as_str());
        }
        if let Some(priority) = update.priority {
            set.insert("priority", priority.as_str());
        }
        if let Some(assigned_to) = update.assigned_to {
            set.insert("assignedTo", assigned_to);
        }
        if let Some(tags) = update.tags {
            set.insert("tags", tags);
        }
        if let Some(due_date) = update.due_date {
            match due_date {
                Some(date) => set.insert("dueDate", BsonDateTime::from_chrono(date)),
                None => set.insert("dueDate", Bson::Null),
            };
        }
        set.insert("updatedAt", BsonDateTime::from_chrono(Utc::now()));

        let updated = self
            .issues
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(TrackError::storage)?;
        Ok(updated.map(Issue::from))
    }

    async fn delete_issue(&self, id: &str) -> Result<()> {
        let oid = Self::object_id(id)?;
        // Deleting an absent document is not an error.
        self.issues
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(TrackError::storage)?;
        Ok(())
    }

    async fn append_comment(
        &self,
        issue_id: &str,
        text: &str,
        author: &str,
    ) -> Result<Option<Issue>> {
        let oid = Self::object_id(issue_id)?;

        // Read-modify-write; single-document atomicity only.
        let Some(mut doc) = self
            .issues
            .find_one(doc! { "_id": oid })
            .await
            .map_err(TrackError::storage)?
        else {
            return Ok(None);
        };

        let now = BsonDateTime::from_chrono(Utc::now());
        doc.comments.push(CommentDoc {
            id: ObjectId::new(),
            text: Some(text.to_string()),
            author: Some(author.to_string()),
            created_at: Some(now),
        });
        doc.updated_at = now;

        self.issues
            .replace_one(doc! { "_id": oid }, &doc)
            .await
            .map_err(TrackError::storage)?;
        Ok(Some(doc.into()))
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        // Single $group pass so the eight counts come from one
        // snapshot rather than eight independent queries.
        let pipeline = vec![doc! {
            "$group": {
                "_id": Bson::Null,
                "total": { "$sum": 1 },
                "open": status_count(Status::Open),
                "closed": status_count(Status::Closed),
                "inProgress": status_count(Status::InProgress),
                "hold": status_count(Status::Hold),
                "high": priority_count(Priority::High),
                "medium": priority_count(Priority::Medium),
                "low": priority_count(Priority::Low),
            }
        }];

        let mut cursor = self
            .issues
            .aggregate(pipeline)
            .await
            .map_err(TrackError::storage)?;
        let row = cursor.try_next().await.map_err(TrackError::storage)?;

        // An empty collection produces no group row at all.
        Ok(row.map_or_else(DashboardStats::default, |row| DashboardStats {
            total_issues: count_field(&row, "total"),
            open_issues: count_field(&row, "open"),
            closed_issues: count_field(&row, "closed"),
            in_progress_issues: count_field(&row, "inProgress"),
            hold_issues: count_field(&row, "hold"),
            high_priority_issues: count_field(&row, "high"),
            medium_priority_issues: count_field(&row, "medium"),
            low_priority_issues: count_field(&row, "low"),
        }))
    }
}
