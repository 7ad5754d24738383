//! # Models
//!
//! This module contains the addressing and installation types used throughout
//! the steward bot.
//!
//! Plugins never hold GitHub resources between events. They address them with
//! [`RepoRef`] and [`IssueRef`] and re-read everything they need from the API.

use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Represents a GitHub account (user or organization).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Account {
    /// The unique ID of the account
    pub id: u64,
    /// The login name of the account
    pub login: String,
    /// The type of account (User or Organization)
    #[serde(rename = "type")]
    pub account_type: String,
}

/// Represents a GitHub App installation.
///
/// The scheduler walks installations to find every repository it has to sweep.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Installation {
    /// The unique ID of the installation
    pub id: u64,
    /// The account (user or organization) where the app is installed
    pub account: Account,
}

impl From<octocrab::models::Installation> for Installation {
    fn from(value: octocrab::models::Installation) -> Self {
        Self {
            id: *value.id,
            account: Account {
                id: *value.account.id,
                login: value.account.login,
                account_type: value.account.r#type,
            },
        }
    }
}

/// Identifies a repository by owner and name.
///
/// # Examples
///
/// ```
/// use github_client::RepoRef;
///
/// let repo = RepoRef::new("octo-org", "widgets");
/// assert_eq!(repo.full_name(), "octo-org/widgets");
///
/// let parsed: RepoRef = "octo-org/widgets".parse().unwrap();
/// assert_eq!(parsed, repo);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    /// The user or organization owning the repository
    pub owner: String,
    /// The repository name, without the owner
    pub name: String,
}

impl RepoRef {
    /// Creates a new repository reference.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Returns `owner/name`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Addresses an issue or pull request in this repository.
    pub fn issue(&self, number: u64) -> IssueRef {
        IssueRef {
            owner: self.owner.clone(),
            repo: self.name.clone(),
            number,
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl std::str::FromStr for RepoRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(format!("expected 'owner/repo', got '{}'", s)),
        }
    }
}

/// Identifies an issue or pull request.
///
/// GitHub shares the number space between issues and pull requests, so the
/// same reference addresses either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl IssueRef {
    /// Returns the repository that contains this issue.
    pub fn repo_ref(&self) -> RepoRef {
        RepoRef::new(self.owner.clone(), self.repo.clone())
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}
