//! Root mutation resolvers.
//!
//! Every issue-returning mutation goes through the same normalized
//! shape, addIssue included (see DESIGN.md).

use std::sync::Arc;

use async_graphql::{Context, ID, Object, Result};

use trackd_core::error::TrackError;
use trackd_core::store::IssueStore;
use trackd_core::validation::IssueValidator;

use super::to_graphql;
use super::types::{AddIssueInput, IssuePayload, UpdateIssueInput};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create an issue. The store assigns id and timestamps; the
    /// comment thread starts empty.
    async fn add_issue(&self, ctx: &Context<'_>, input: AddIssueInput) -> Result<IssuePayload> {
        let new = input.into_new_issue();
        IssueValidator::validate_new(&new)
            .map_err(|errors| to_graphql(TrackError::from_field_errors(errors)))?;

        let store = ctx.data_unchecked::<Arc<dyn IssueStore>>();
        let issue = store.create_issue(new).await.map_err(to_graphql)?;
        Ok(issue.into())
    }

    /// Partial field merge; null when the id matches nothing.
    /// Refreshes updatedAt. Last write wins.
    async fn update_issue(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateIssueInput,
    ) -> Result<Option<IssuePayload>> {
        let store = ctx.data_unchecked::<Arc<dyn IssueStore>>();
        let issue = store
            .update_issue(&id, input.into_update())
            .await
            .map_err(to_graphql)?;
        Ok(issue.map(IssuePayload::from))
    }

    /// Remove an issue. Always true, whether or not anything existed.
    async fn delete_issue(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let store = ctx.data_unchecked::<Arc<dyn IssueStore>>();
        store.delete_issue(&id).await.map_err(to_graphql)?;
        Ok(true)
    }

    /// Append a comment and return the issue with all comments
    /// re-normalized. Validation failures leave the issue untouched.
    async fn add_comment(
        &self,
        ctx: &Context<'_>,
        issue_id: ID,
        text: String,
        author: String,
    ) -> Result<IssuePayload> {
        let (text, author) =
            IssueValidator::validate_comment(&text, &author).map_err(to_graphql)?;

        let store = ctx.data_unchecked::<Arc<dyn IssueStore>>();
        let issue = store
            .append_comment(&issue_id, text, author)
            .await
            .map_err(to_graphql)?
            .ok_or_else(|| {
                to_graphql(TrackError::validation("issueId", "issue not found"))
            })?;
        Ok(issue.into())
    }
}
