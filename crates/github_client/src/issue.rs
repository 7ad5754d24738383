//! Issue, comment and issue-event types.

use serde::{Deserialize, Serialize};

use crate::{has_label, Label, User};

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;

/// An issue as returned by the issues and search endpoints.
///
/// Pull requests are returned by the same endpoints; they carry a
/// `pull_request` object which is exposed through [`Issue::is_pull_request`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    /// "open" or "closed"
    pub state: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub user: User,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    /// Returns true if the issue state is "open".
    pub fn is_open(&self) -> bool {
        self.state == "open"
    }

    /// Returns true if this search or issues result is actually a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Returns true if the issue carries a label with exactly this name.
    pub fn has_label(&self, name: &str) -> bool {
        has_label(&self.labels, name)
    }

    /// Returns the body, or an empty string when the issue has none.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// Desired state of an issue when patching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// Payload for creating a new issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// A comment on an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub body: String,
    pub user: User,
}

/// An entry of an issue's event history ("closed", "reopened", "labeled", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueEvent {
    pub event: String,
}
