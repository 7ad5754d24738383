//! Error types for the steward core.
//!
//! Unmet preconditions (a missing label, an unparseable title, a closed
//! issue) are not errors; plugins return `Ok(())` for them. The variants
//! below describe failures the dispatcher logs.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while handling an event.
#[derive(Error, Debug)]
pub enum StewardError {
    /// A GitHub API call failed.
    #[error("GitHub API call failed: {0}")]
    GitHub(#[from] github_client::Error),

    /// The event payload did not have the expected shape.
    #[error("Failed to parse event payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The event payload lacks a field the plugin relies on.
    #[error("Event payload is missing field '{0}'")]
    MissingField(&'static str),
}

/// Result type for steward operations.
pub type StewardResult<T> = Result<T, StewardError>;
