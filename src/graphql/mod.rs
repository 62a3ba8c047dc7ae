//! GraphQL schema and resolvers for trackd.
//!
//! # Submodules
//!
//! - [`scalar`] - the `Date` scalar
//! - [`types`] - wire objects, enums, and inputs
//! - [`query`] - root query resolvers
//! - [`mutation`] - root mutation resolvers

pub mod mutation;
pub mod query;
pub mod scalar;
pub mod types;

use std::sync::Arc;

use async_graphql::{EmptySubscription, ErrorExtensions, Schema};

use trackd_core::error::TrackError;
use trackd_core::store::IssueStore;

use mutation::MutationRoot;
use query::QueryRoot;

pub type TrackSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema over the given store.
pub fn build_schema(store: Arc<dyn IssueStore>) -> TrackSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

/// Map a domain error onto the GraphQL error envelope.
///
/// Storage failures are logged here before being re-raised with the
/// wrapped message; validation failures surface verbatim.
pub(crate) fn to_graphql(err: TrackError) -> async_graphql::Error {
    let code = match &err {
        TrackError::Validation { .. } | TrackError::ValidationErrors { .. } => "VALIDATION",
        TrackError::InvalidId { .. } => "INVALID_ARGUMENT",
        TrackError::Storage(_) => {
            tracing::error!(error = %err, "storage failure");
            "INTERNAL"
        }
    };
    async_graphql::Error::new(err.to_string()).extend_with(|_, e| e.set("code", code))
}
