//! Pull request, commit, file and review types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{has_label, Label, User};

#[cfg(test)]
#[path = "pull_request_tests.rs"]
mod tests;

/// A pull request as returned by the pulls endpoints and webhook payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub html_url: String,
    pub user: User,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub head: GitRef,
    #[serde(default)]
    pub draft: bool,
}

impl PullRequest {
    /// Returns true if the pull request carries a label with exactly this name.
    pub fn has_label(&self, name: &str) -> bool {
        has_label(&self.labels, name)
    }
}

/// The head or base of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRef {
    pub sha: String,
    #[serde(rename = "ref", default)]
    pub ref_name: String,
}

/// A commit as listed on a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetails,
}

impl Commit {
    /// Returns the full commit message.
    pub fn message(&self) -> &str {
        &self.commit.message
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetails {
    pub message: String,
}

/// A file changed by a pull request. `filename` is relative to the repository root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestFile {
    pub filename: String,
    #[serde(default)]
    pub status: String,
}

/// Verdict of a pull request review.
///
/// The REST API reports states in upper case while webhook payloads use
/// lower case; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewState {
    #[serde(alias = "approved")]
    Approved,
    #[serde(alias = "changes_requested")]
    ChangesRequested,
    #[serde(alias = "commented")]
    Commented,
    #[serde(alias = "dismissed")]
    Dismissed,
    #[serde(alias = "pending")]
    Pending,
    #[serde(other)]
    Unknown,
}

/// A submitted pull request review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    #[serde(default)]
    pub user: Option<User>,
    pub state: ReviewState,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}
