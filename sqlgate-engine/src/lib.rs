//! Bound database capability for the sqlgate gateway.
//!
//! Defines the [`Engine`] trait the gateway dispatches against, and the
//! [`HttpEngine`] implementation that speaks the remote query engine's
//! JSON API over HTTP/1.1.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod engine;
pub mod error;
pub mod http;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use http::HttpEngine;
