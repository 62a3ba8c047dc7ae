//! Persistence backends for trackd.
//!
//! The store contract lives in `trackd-core`; this module provides
//! the MongoDB implementation used by the server binary.
//!
//! # Submodules
//!
//! - [`mongo`] - MongoDB document store backend

pub mod mongo;

pub use mongo::MongoStore;
