//! Core domain types for the sqlgate SQL-over-HTTP gateway.
//!
//! Defines the closed scalar parameter variant, prepared statements,
//! statement outcomes, and the text ceilings shared by the gateway and
//! engine crates.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod limits;
pub mod outcome;
pub mod statement;
pub mod value;

pub use error::CoreError;
pub use limits::{normalize_sql, MAX_EXEC_TEXT_CHARS, MAX_QUERY_TEXT_CHARS};
pub use outcome::{ExecOutcome, QueryOutcome, Row};
pub use statement::Statement;
pub use value::SqlValue;
