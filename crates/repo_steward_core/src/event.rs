//! Webhook events and typed views of their payloads.
//!
//! An [`Event`] keeps the raw JSON payload. Plugins deserialize the view they
//! need with [`Event::parse`]; fields they do not read are ignored.

use chrono::Utc;
use github_client::{
    Comment, Issue, Label, PullRequest, RepoRef, Repository, Review, StatusState, User,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use std::fmt;

use crate::{StewardError, StewardResult};

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

/// Action carried by synthetic repository sweep events.
pub const SWEEP_ACTION: &str = "repository";

/// Name of a webhook event, as sent in the `X-GitHub-Event` header.
///
/// See [GitHub webhook events documentation](https://docs.github.com/en/webhooks/webhook-events-and-payloads).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventName {
    /// Activity related to issues
    Issues,
    /// Activity related to issue and pull request comments
    IssueComment,
    /// Activity related to pull requests
    PullRequest,
    /// Activity related to pull request reviews
    PullRequestReview,
    /// Commit status changes
    Status,
    /// Synthetic event raised by the sweep scheduler
    Schedule,
    /// Sent by GitHub when a webhook is first configured
    Ping,
    /// Any event the bot does not subscribe to
    Other(String),
}

impl EventName {
    /// Converts a header value to an event name. Unknown names map to [`EventName::Other`].
    pub fn parse(s: &str) -> Self {
        match s {
            "issues" => Self::Issues,
            "issue_comment" => Self::IssueComment,
            "pull_request" => Self::PullRequest,
            "pull_request_review" => Self::PullRequestReview,
            "status" => Self::Status,
            "schedule" => Self::Schedule,
            "ping" => Self::Ping,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Issues => "issues",
            Self::IssueComment => "issue_comment",
            Self::PullRequest => "pull_request",
            Self::PullRequestReview => "pull_request_review",
            Self::Status => "status",
            Self::Schedule => "schedule",
            Self::Ping => "ping",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A received (or synthesized) event.
#[derive(Debug, Clone)]
pub struct Event {
    pub name: EventName,
    /// The payload's `action` field, if any
    pub action: Option<String>,
    /// Value of the `X-GitHub-Delivery` header, used to correlate logs
    pub delivery_id: String,
    pub payload: Value,
}

impl Event {
    /// Creates an event, reading the action from the payload's `action` field.
    pub fn new(name: EventName, delivery_id: impl Into<String>, payload: Value) -> Self {
        let action = payload
            .get("action")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            name,
            action,
            delivery_id: delivery_id.into(),
            payload,
        }
    }

    /// Builds the synthetic `schedule.repository` event for one repository.
    pub fn repository_sweep(repo: &RepoRef) -> Self {
        let payload = json!({
            "action": SWEEP_ACTION,
            "repository": {
                "name": repo.name,
                "full_name": repo.full_name(),
                "owner": { "login": repo.owner },
            }
        });

        Self::new(
            EventName::Schedule,
            format!("sweep-{}-{}", repo, Utc::now().timestamp()),
            payload,
        )
    }

    /// Returns the action, or an empty string when the event has none.
    pub fn action_str(&self) -> &str {
        self.action.as_deref().unwrap_or_default()
    }

    /// Deserializes the payload into a typed view.
    pub fn parse<T: DeserializeOwned>(&self) -> StewardResult<T> {
        Ok(T::deserialize(&self.payload)?)
    }

    /// Returns the repository the event belongs to.
    pub fn repository(&self) -> StewardResult<RepoRef> {
        let repository = self
            .payload
            .get("repository")
            .ok_or(StewardError::MissingField("repository"))?;
        let owner = repository
            .pointer("/owner/login")
            .and_then(Value::as_str)
            .ok_or(StewardError::MissingField("repository.owner.login"))?;
        let name = repository
            .get("name")
            .and_then(Value::as_str)
            .ok_or(StewardError::MissingField("repository.name"))?;

        Ok(RepoRef::new(owner, name))
    }
}

/// Payload of an `issues` event.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuesEvent {
    pub action: String,
    pub issue: Issue,
    /// The label added or removed, for `labeled` and `unlabeled`
    #[serde(default)]
    pub label: Option<Label>,
    pub repository: Repository,
    pub sender: User,
}

/// Payload of an `issue_comment` event.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueCommentEvent {
    pub action: String,
    pub issue: Issue,
    pub comment: Comment,
    pub repository: Repository,
    pub sender: User,
}

/// Payload of a `pull_request` event.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub number: u64,
    pub pull_request: PullRequest,
    #[serde(default)]
    pub label: Option<Label>,
    pub repository: Repository,
    pub sender: User,
}

/// Payload of a `pull_request_review` event.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestReviewEvent {
    pub action: String,
    pub review: Review,
    pub pull_request: PullRequest,
    pub repository: Repository,
}

/// Payload of a `status` event.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusEvent {
    pub sha: String,
    pub state: StatusState,
    #[serde(default)]
    pub context: String,
    pub repository: Repository,
}

/// Payload of a synthetic `schedule.repository` event.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositorySweep {
    pub repository: Repository,
}
