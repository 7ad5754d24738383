//! Repository types returned when listing an installation's repositories.

use serde::{Deserialize, Serialize};

use crate::{RepoRef, User};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// A repository visible to the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// The name of the repository
    pub name: String,
    /// The full name of the repository (owner/name)
    #[serde(default)]
    pub full_name: String,
    pub owner: User,
    #[serde(default)]
    pub archived: bool,
}

impl Repository {
    /// Returns the reference used to address API calls to this repository.
    pub fn repo_ref(&self) -> RepoRef {
        RepoRef::new(self.owner.login.clone(), self.name.clone())
    }
}

/// Response of `GET /installation/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InstallationRepositories {
    pub total_count: u64,
    pub repositories: Vec<Repository>,
}
