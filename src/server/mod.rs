//! HTTP transport: a single GraphQL endpoint.
//!
//! `POST /graphql` executes queries and mutations; `GET /graphql`
//! serves the interactive GraphiQL page. CORS is permissive; any
//! frontend origin may call the API.

use std::net::SocketAddr;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::Router;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use tower_http::cors::CorsLayer;

use crate::graphql::TrackSchema;

/// Serve the schema until the process is terminated.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(port: u16, schema: TrackSchema) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/graphql", get(graphiql).post_service(GraphQL::new(schema)))
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("GraphQL server running at http://{addr}/graphql");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
