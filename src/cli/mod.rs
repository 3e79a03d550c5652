//! Command-line support for jsonb-field
//!
//! Provides programmatic access to the `jsonb-field` commands so they can be
//! embedded in other tools and tested without spawning a process.

mod check;
mod compile;
mod convert;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use compile::{CompileOptions, CompileResult, execute_compile};
pub use convert::{parse_condition, parse_rows};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Column definition or condition was rejected
    #[error("Lookup error: {0}")]
    Lookup(#[from] crate::LookupError),

    /// Input rows were not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Condition argument is not of the form `path=operand`
    #[error("Invalid condition '{0}'; expected path=operand, e.g. field__a=\"b\"")]
    InvalidCondition(String),

    /// Input is not an array of objects
    #[error("Invalid rows: {0}")]
    InvalidRows(String),

    /// No input provided
    #[error("No input provided. Use --input or pipe JSON rows to stdin.")]
    NoInput,
}
