//! Root query resolvers.

use std::sync::Arc;

use async_graphql::{Context, ID, Object, Result};

use trackd_core::store::IssueStore;

use super::to_graphql;
use super::types::{DashboardStatsPayload, IssuePayload};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All issues, normalized. No filtering, no pagination.
    async fn issues(&self, ctx: &Context<'_>) -> Result<Vec<IssuePayload>> {
        let store = ctx.data_unchecked::<Arc<dyn IssueStore>>();
        let issues = store.list_issues().await.map_err(to_graphql)?;
        Ok(issues.into_iter().map(IssuePayload::from).collect())
    }

    /// A single issue by id; null when absent.
    async fn issue(&self, ctx: &Context<'_>, id: ID) -> Result<Option<IssuePayload>> {
        let store = ctx.data_unchecked::<Arc<dyn IssueStore>>();
        let issue = store.get_issue(&id).await.map_err(to_graphql)?;
        Ok(issue.map(IssuePayload::from))
    }

    /// Aggregate counts over the whole collection.
    async fn dashboard_stats(&self, ctx: &Context<'_>) -> Result<DashboardStatsPayload> {
        let store = ctx.data_unchecked::<Arc<dyn IssueStore>>();
        let stats = store.dashboard_stats().await.map_err(to_graphql)?;
        Ok(stats.into())
    }
}
