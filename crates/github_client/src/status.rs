//! Commit status types.
//!
//! GitHub keeps one status per (sha, context) pair; writing a new status for
//! the same pair replaces the previous one.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

/// GitHub's limit on status descriptions.
pub const MAX_STATUS_DESCRIPTION_LENGTH: usize = 140;

/// State of a commit status, or of a combined status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Success,
    Pending,
    Failure,
    Error,
}

impl StatusState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Pending => "pending",
            Self::Failure => "failure",
            Self::Error => "error",
        }
    }
}

/// A single status attached to a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatus {
    pub state: StatusState,
    pub context: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_url: Option<String>,
}

/// The combined status of a ref: an overall state plus the latest status per context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedStatus {
    pub state: StatusState,
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub statuses: Vec<CommitStatus>,
}

impl CombinedStatus {
    /// Returns true if a status with this context is present.
    pub fn has_context(&self, context: &str) -> bool {
        self.statuses.iter().any(|s| s.context == context)
    }
}

/// Payload for writing a commit status.
///
/// # Examples
///
/// ```
/// use github_client::{NewCommitStatus, StatusState};
///
/// let status = NewCommitStatus::new(StatusState::Pending, "wip", "This PR is a work in progress");
/// assert_eq!(status.context, "wip");
/// assert!(status.target_url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCommitStatus {
    pub state: StatusState,
    pub context: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
}

impl NewCommitStatus {
    /// Creates a status; the description is cut to GitHub's 140 character limit.
    pub fn new(state: StatusState, context: impl Into<String>, description: impl Into<String>) -> Self {
        let description: String = description.into();
        let description = if description.chars().count() > MAX_STATUS_DESCRIPTION_LENGTH {
            description
                .chars()
                .take(MAX_STATUS_DESCRIPTION_LENGTH)
                .collect()
        } else {
            description
        };

        Self {
            state,
            context: context.into(),
            description,
            target_url: None,
        }
    }

    /// Sets the link shown next to the status.
    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        self.target_url = Some(url.into());
        self
    }
}
