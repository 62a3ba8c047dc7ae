//! `trackd` - Issue tracking GraphQL API backed by MongoDB.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`config`] - Process configuration using clap
//! - [`logging`] - tracing subscriber setup
//! - [`storage`] - MongoDB store backend
//! - [`graphql`] - Schema, scalars, and resolvers
//! - [`server`] - axum HTTP transport
//!
//! The data model, validation, and store contract live in the
//! `trackd-core` crate.

#![forbid(unsafe_code)]

pub mod config;
pub mod graphql;
pub mod logging;
pub mod server;
pub mod storage;

use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;

use config::Config;
use storage::MongoStore;

/// Run the server.
///
/// This is the main entry point called from `main()`. The initial
/// store connection failure is fatal; everything after that surfaces
/// as GraphQL errors.
///
/// # Errors
///
/// Returns an error if the store is unreachable or the listener
/// cannot bind.
pub async fn run() -> anyhow::Result<()> {
    let config = Config::parse();
    logging::init(config.verbose, config.quiet);

    let store = MongoStore::connect(&config.mongo_uri, &config.database)
        .await
        .context("MongoDB connection error")?;
    tracing::info!(database = %config.database, "MongoDB connected successfully");

    let schema = graphql::build_schema(Arc::new(store));
    server::serve(config.port, schema).await
}
