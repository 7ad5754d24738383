//! User domain types.
//!
//! This module contains types representing GitHub user accounts.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;

/// Represents a GitHub user account.
///
/// Only the login is needed by the bot: comments are attributed by login, and
/// assignees and mentions are expressed as logins.
///
/// # Examples
///
/// ```rust
/// use github_client::User;
///
/// let user = User::new("octocat");
/// assert_eq!(user.login, "octocat");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// The unique numeric ID of the user
    #[serde(default)]
    pub id: u64,
    /// The login name of the user
    pub login: String,
}

impl User {
    /// Creates a user with only a login.
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            id: 0,
            login: login.into(),
        }
    }
}
