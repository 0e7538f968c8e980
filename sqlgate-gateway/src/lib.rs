//! Authenticated HTTP gateway exposing a remote relational query engine.
//!
//! Accepts JSON requests of three shapes (single query with optional
//! bound parameters, a batch of such queries, raw multi-statement exec),
//! forwards them to the bound engine, and returns normalized JSON
//! responses or structured errors.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod schema;
