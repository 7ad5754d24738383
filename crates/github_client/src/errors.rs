//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when the bot talks to the
//! GitHub API through the github_client crate.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.get_issue(&issue).await {
///     Ok(issue) => println!("Issue #{} is {}", issue.number, issue.state),
///     Err(Error::NotFound) => println!("Issue does not exist"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic API request failure.
    ///
    /// GitHub answered with an error status that has no more specific variant.
    #[error("API request failed")]
    ApiError(),

    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when:
    /// - GitHub App credentials are invalid or expired
    /// - The private key cannot be parsed
    /// - An installation token cannot be issued
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing a response or payload from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// GitHub answers 404 both for missing resources and for resources the
    /// installation cannot see.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    ///
    /// Plugins do not retry; the delivery is logged as failed.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
