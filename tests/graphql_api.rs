//! End-to-end resolver tests: real GraphQL documents executed against
//! the schema over an in-memory store.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use trackd::graphql::{TrackSchema, build_schema};
use trackd_core::error::{Result, TrackError};
use trackd_core::model::{CommentRecord, DashboardStats, Issue, IssueUpdate, NewIssue, Priority, Status};
use trackd_core::store::{IssueStore, MemoryStore};

fn fixture() -> (Arc<MemoryStore>, TrackSchema) {
    let store = Arc::new(MemoryStore::new());
    let schema = build_schema(store.clone());
    (store, schema)
}

async fn execute(schema: &TrackSchema, query: &str) -> serde_json::Value {
    let resp = schema.execute(query).await;
    assert!(
        resp.errors.is_empty(),
        "unexpected errors for {query}: {:?}",
        resp.errors
    );
    resp.data.into_json().unwrap()
}

async fn execute_expecting_error(schema: &TrackSchema, query: &str) -> serde_json::Value {
    let resp = schema.execute(query).await;
    assert!(!resp.errors.is_empty(), "expected errors for {query}");
    serde_json::to_value(&resp.errors[0]).unwrap()
}

/// Store whose every round trip fails, as if the database dropped
/// the connection after startup.
struct UnreachableStore;

#[async_trait::async_trait]
impl IssueStore for UnreachableStore {
    async fn list_issues(&self) -> Result<Vec<Issue>> {
        Err(TrackError::storage("connection reset"))
    }

    async fn get_issue(&self, _id: &str) -> Result<Option<Issue>> {
        Err(TrackError::storage("connection reset"))
    }

    async fn create_issue(&self, _new: NewIssue) -> Result<Issue> {
        Err(TrackError::storage("connection reset"))
    }

    async fn update_issue(&self, _id: &str, _update: IssueUpdate) -> Result<Option<Issue>> {
        Err(TrackError::storage("connection reset"))
    }

    async fn delete_issue(&self, _id: &str) -> Result<()> {
        Err(TrackError::storage("connection reset"))
    }

    async fn append_comment(
        &self,
        _issue_id: &str,
        _text: &str,
        _author: &str,
    ) -> Result<Option<Issue>> {
        Err(TrackError::storage("connection reset"))
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        Err(TrackError::storage("connection reset"))
    }
}

fn draft(title: &str) -> NewIssue {
    NewIssue {
        title: title.to_string(),
        description: "desc".to_string(),
        assigned_to: "alice".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn add_issue_then_list_includes_literal_fields() {
    let (_store, schema) = fixture();

    let data = execute(
        &schema,
        r#"mutation {
            addIssue(input: {
                title: "Bug A",
                description: "desc",
                status: open,
                priority: high,
                assignedTo: "alice"
            }) { id title description status priority assignedTo tags comments { id } }
        }"#,
    )
    .await;

    let added = &data["addIssue"];
    assert_eq!(added["title"], "Bug A");
    assert_eq!(added["status"], "open");
    assert_eq!(added["priority"], "high");
    assert_eq!(added["assignedTo"], "alice");
    assert_eq!(added["comments"], serde_json::json!([]));

    let listed = execute(&schema, "{ issues { title status priority comments { id } } }").await;
    let issues = listed["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["title"], "Bug A");
    assert_eq!(issues[0]["status"], "open");
    assert_eq!(issues[0]["priority"], "high");
    assert_eq!(issues[0]["comments"], serde_json::json!([]));
}

#[tokio::test]
async fn due_date_round_trips_as_iso_string() {
    let (_store, schema) = fixture();

    let data = execute(
        &schema,
        r#"mutation {
            addIssue(input: {
                title: "Dated",
                description: "desc",
                assignedTo: "alice",
                dueDate: "2024-06-01T00:00:00.000Z"
            }) { id dueDate }
        }"#,
    )
    .await;
    assert_eq!(data["addIssue"]["dueDate"], "2024-06-01T00:00:00.000Z");

    let id = data["addIssue"]["id"].as_str().unwrap();
    let fetched = execute(
        &schema,
        &format!(r#"{{ issue(id: "{id}") {{ dueDate createdAt updatedAt }} }}"#),
    )
    .await;
    assert_eq!(fetched["issue"]["dueDate"], "2024-06-01T00:00:00.000Z");

    // Server-assigned timestamps are valid ISO-8601 as well.
    for key in ["createdAt", "updatedAt"] {
        let value = fetched["issue"][key].as_str().unwrap();
        DateTime::parse_from_rfc3339(value).unwrap();
    }
}

#[tokio::test]
async fn unknown_issue_id_is_null_not_error() {
    let (_store, schema) = fixture();
    let data = execute(
        &schema,
        r#"{ issue(id: "000000000000000000000000") { id } }"#,
    )
    .await;
    assert!(data["issue"].is_null());
}

#[tokio::test]
async fn sparse_stored_comments_are_normalized() {
    let (store, schema) = fixture();
    let now = Utc::now();
    store
        .insert(Issue {
            id: "legacy1".to_string(),
            title: "Old issue".to_string(),
            description: "desc".to_string(),
            status: Status::Open,
            priority: Priority::Medium,
            assigned_to: "bob".to_string(),
            tags: Vec::new(),
            due_date: None,
            created_at: now,
            updated_at: now,
            comments: vec![
                CommentRecord {
                    id: "c1".to_string(),
                    ..Default::default()
                },
                CommentRecord {
                    id: "c2".to_string(),
                    text: Some("kept".to_string()),
                    author: Some("carol".to_string()),
                    created_at: Some(now),
                },
            ],
        })
        .await;

    let data = execute(
        &schema,
        r#"{ issue(id: "legacy1") { comments { text author createdAt } } }"#,
    )
    .await;
    let comments = data["issue"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);

    // Missing fields got defaults.
    assert_eq!(comments[0]["text"], "");
    assert_eq!(comments[0]["author"], "Anonymous");
    DateTime::parse_from_rfc3339(comments[0]["createdAt"].as_str().unwrap()).unwrap();

    // Present fields survived.
    assert_eq!(comments[1]["text"], "kept");
    assert_eq!(comments[1]["author"], "carol");
}

#[tokio::test]
async fn blank_comment_text_fails_and_does_not_mutate() {
    let (store, schema) = fixture();
    let issue = store.create_issue(draft("Quiet")).await.unwrap();

    let error = execute_expecting_error(
        &schema,
        &format!(
            r#"mutation {{ addComment(issueId: "{}", text: "   ", author: "bob") {{ id }} }}"#,
            issue.id
        ),
    )
    .await;
    assert_eq!(error["extensions"]["code"], "VALIDATION");
    assert!(error["message"].as_str().unwrap().contains("text"));

    let unchanged = store.get_issue(&issue.id).await.unwrap().unwrap();
    assert!(unchanged.comments.is_empty());
    assert_eq!(unchanged.updated_at, issue.updated_at);
}

#[tokio::test]
async fn blank_comment_author_fails() {
    let (store, schema) = fixture();
    let issue = store.create_issue(draft("Quiet")).await.unwrap();

    let error = execute_expecting_error(
        &schema,
        &format!(
            r#"mutation {{ addComment(issueId: "{}", text: "hi", author: " ") {{ id }} }}"#,
            issue.id
        ),
    )
    .await;
    assert_eq!(error["extensions"]["code"], "VALIDATION");
    assert!(error["message"].as_str().unwrap().contains("author"));
}

#[tokio::test]
async fn comment_on_missing_issue_fails_and_leaves_store_unchanged() {
    let (store, schema) = fixture();

    let error = execute_expecting_error(
        &schema,
        r#"mutation { addComment(issueId: "000000000000000000000000", text: "hi", author: "bob") { id } }"#,
    )
    .await;
    assert_eq!(error["extensions"]["code"], "VALIDATION");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn add_comment_trims_and_normalizes() {
    let (store, schema) = fixture();
    let issue = store.create_issue(draft("Discussed")).await.unwrap();

    let data = execute(
        &schema,
        &format!(
            r#"mutation {{ addComment(issueId: "{}", text: "  looks good  ", author: " carol ") {{
                comments {{ id text author createdAt }}
            }} }}"#,
            issue.id
        ),
    )
    .await;
    let comments = data["addComment"]["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["text"], "looks good");
    assert_eq!(comments[0]["author"], "carol");
    DateTime::parse_from_rfc3339(comments[0]["createdAt"].as_str().unwrap()).unwrap();
}

#[tokio::test]
async fn delete_is_true_for_present_and_absent_ids() {
    let (store, schema) = fixture();
    let issue = store.create_issue(draft("Doomed")).await.unwrap();

    let first = execute(
        &schema,
        &format!(r#"mutation {{ deleteIssue(id: "{}") }}"#, issue.id),
    )
    .await;
    assert_eq!(first["deleteIssue"], true);

    // Second delete of the same id still reports true.
    let second = execute(
        &schema,
        &format!(r#"mutation {{ deleteIssue(id: "{}") }}"#, issue.id),
    )
    .await;
    assert_eq!(second["deleteIssue"], true);

    let gone = execute(&schema, &format!(r#"{{ issue(id: "{}") {{ id }} }}"#, issue.id)).await;
    assert!(gone["issue"].is_null());
}

#[tokio::test]
async fn update_merges_partial_fields_and_refreshes_updated_at() {
    let (store, schema) = fixture();
    let issue = store.create_issue(draft("Original")).await.unwrap();

    let data = execute(
        &schema,
        &format!(
            r#"mutation {{ updateIssue(id: "{}", input: {{ status: closed }}) {{
                title status priority updatedAt
            }} }}"#,
            issue.id
        ),
    )
    .await;
    let updated = &data["updateIssue"];
    assert_eq!(updated["title"], "Original");
    assert_eq!(updated["status"], "closed");
    assert_eq!(updated["priority"], "medium");

    // The wire form truncates to milliseconds; allow for that.
    let stamp = DateTime::parse_from_rfc3339(updated["updatedAt"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc);
    assert!(stamp >= issue.updated_at - chrono::Duration::milliseconds(1));
}

#[tokio::test]
async fn update_unknown_id_is_null() {
    let (_store, schema) = fixture();
    let data = execute(
        &schema,
        r#"mutation { updateIssue(id: "000000000000000000000000", input: { title: "X" }) { id } }"#,
    )
    .await;
    assert!(data["updateIssue"].is_null());
}

#[tokio::test]
async fn blank_required_fields_fail_validation() {
    let (store, schema) = fixture();

    let error = execute_expecting_error(
        &schema,
        r#"mutation {
            addIssue(input: { title: "  ", description: "desc", assignedTo: "alice" }) { id }
        }"#,
    )
    .await;
    assert_eq!(error["extensions"]["code"], "VALIDATION");
    assert!(error["message"].as_str().unwrap().contains("title"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn storage_failures_surface_as_internal() {
    let schema = build_schema(Arc::new(UnreachableStore));

    for query in [
        "{ issues { id } }",
        "{ dashboardStats { totalIssues } }",
        r#"mutation { deleteIssue(id: "000000000000000000000000") }"#,
    ] {
        let error = execute_expecting_error(&schema, query).await;
        assert_eq!(error["extensions"]["code"], "INTERNAL");
        assert!(
            error["message"]
                .as_str()
                .unwrap()
                .contains("connection reset")
        );
    }
}

#[tokio::test]
async fn dashboard_stats_total_equals_status_sum() {
    let (store, schema) = fixture();
    store.create_issue(draft("One")).await.unwrap();
    store
        .create_issue(NewIssue {
            status: Status::Closed,
            priority: Priority::High,
            ..draft("Two")
        })
        .await
        .unwrap();
    store
        .create_issue(NewIssue {
            status: Status::InProgress,
            priority: Priority::Low,
            ..draft("Three")
        })
        .await
        .unwrap();

    let data = execute(
        &schema,
        r#"{ dashboardStats {
            totalIssues openIssues closedIssues inProgressIssues holdIssues
            highPriorityIssues mediumPriorityIssues lowPriorityIssues
        } }"#,
    )
    .await;
    let stats = &data["dashboardStats"];
    let sum = stats["openIssues"].as_i64().unwrap()
        + stats["closedIssues"].as_i64().unwrap()
        + stats["inProgressIssues"].as_i64().unwrap()
        + stats["holdIssues"].as_i64().unwrap();
    assert_eq!(stats["totalIssues"].as_i64().unwrap(), 3);
    assert_eq!(stats["totalIssues"].as_i64().unwrap(), sum);

    let priority_sum = stats["highPriorityIssues"].as_i64().unwrap()
        + stats["mediumPriorityIssues"].as_i64().unwrap()
        + stats["lowPriorityIssues"].as_i64().unwrap();
    assert_eq!(priority_sum, 3);
}
