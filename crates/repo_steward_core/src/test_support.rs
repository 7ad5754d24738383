//! In-memory GitHub used by plugin tests.
//!
//! `MockGitHub` answers reads from canned data and records every mutating
//! call so tests can assert on exactly what a plugin did.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use github_client::{
    CombinedStatus, Comment, Commit, CommitDetails, CommitStatus, Error, GitHubApi, GitRef,
    Issue, IssueEvent, IssueRef, IssueState, Label, NewCommitStatus, NewIssue, PullRequest,
    PullRequestFile, RepoRef, Review, ReviewState, StatusState, User,
};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::{BotSettings, Event, EventName};

pub const OWNER: &str = "octo-org";
pub const REPO: &str = "widgets";
pub const BOT_LOGIN: &str = "steward-bot";

/// A mutating call made against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AddLabels {
        issue: u64,
        labels: Vec<String>,
    },
    RemoveLabel {
        issue: u64,
        label: String,
    },
    AddAssignees {
        issue: u64,
        assignees: Vec<String>,
    },
    CreateIssue {
        title: String,
        body: String,
        labels: Vec<String>,
    },
    UpdateIssueState {
        issue: u64,
        state: IssueState,
    },
    LockIssue {
        issue: u64,
    },
    CreateComment {
        issue: u64,
        body: String,
    },
    DeleteComment {
        comment_id: u64,
    },
    CreateCommitStatus {
        sha: String,
        state: StatusState,
        context: String,
        description: String,
        target_url: Option<String>,
    },
}

#[derive(Default)]
pub struct MockGitHub {
    repo_labels: HashSet<String>,
    issues: HashMap<u64, Issue>,
    issue_events: HashMap<u64, Vec<IssueEvent>>,
    comments: HashMap<u64, Vec<Comment>>,
    search_results: Vec<(String, Vec<Issue>)>,
    open_pull_requests: Vec<PullRequest>,
    commits: HashMap<u64, Vec<Commit>>,
    files: HashMap<u64, Vec<PullRequestFile>>,
    reviews: HashMap<u64, Vec<Review>>,
    combined_statuses: HashMap<String, CombinedStatus>,
    team_members: Vec<User>,
    failing_issues: HashSet<u64>,
    calls: Mutex<Vec<Call>>,
    queries: Mutex<Vec<String>>,
}

impl MockGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo_label(mut self, name: &str) -> Self {
        self.repo_labels.insert(name.to_string());
        self
    }

    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.insert(issue.number, issue);
        self
    }

    pub fn with_issue_events(mut self, number: u64, events: &[&str]) -> Self {
        self.issue_events.insert(
            number,
            events
                .iter()
                .map(|e| IssueEvent {
                    event: e.to_string(),
                })
                .collect(),
        );
        self
    }

    pub fn with_comments(mut self, number: u64, comments: Vec<Comment>) -> Self {
        self.comments.insert(number, comments);
        self
    }

    /// Queries containing `fragment` return `issues`. The first matching entry wins.
    pub fn with_search_result(mut self, fragment: &str, issues: Vec<Issue>) -> Self {
        self.search_results.push((fragment.to_string(), issues));
        self
    }

    pub fn with_open_pull_request(mut self, pr: PullRequest) -> Self {
        self.open_pull_requests.push(pr);
        self
    }

    pub fn with_commits(mut self, number: u64, commits: Vec<Commit>) -> Self {
        self.commits.insert(number, commits);
        self
    }

    pub fn with_files(mut self, number: u64, filenames: &[&str]) -> Self {
        self.files.insert(
            number,
            filenames
                .iter()
                .map(|f| PullRequestFile {
                    filename: f.to_string(),
                    status: "modified".to_string(),
                })
                .collect(),
        );
        self
    }

    pub fn with_reviews(mut self, number: u64, reviews: Vec<Review>) -> Self {
        self.reviews.insert(number, reviews);
        self
    }

    /// Sets the combined status of `sha`, with one status per context.
    pub fn with_combined_status(mut self, sha: &str, state: StatusState, contexts: &[&str]) -> Self {
        self.combined_statuses.insert(
            sha.to_string(),
            CombinedStatus {
                state,
                sha: sha.to_string(),
                statuses: contexts
                    .iter()
                    .map(|c| CommitStatus {
                        state,
                        context: c.to_string(),
                        description: None,
                        target_url: None,
                    })
                    .collect(),
            },
        );
        self
    }

    pub fn with_team_members(mut self, logins: &[&str]) -> Self {
        self.team_members = logins.iter().map(|l| User::new(*l)).collect();
        self
    }

    /// Reads and comments on this issue fail with an API error.
    pub fn with_failing_issue(mut self, number: u64) -> Self {
        self.failing_issues.insert(number);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn search_queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// The commit statuses written, in order.
    pub fn statuses(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::CreateCommitStatus { .. }))
            .collect()
    }

    /// The comments posted, as (issue, body) pairs.
    pub fn posted_comments(&self) -> Vec<(u64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateComment { issue, body } => Some((issue, body)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GitHubApi for MockGitHub {
    async fn add_labels(&self, issue: &IssueRef, labels: &[String]) -> Result<(), Error> {
        self.record(Call::AddLabels {
            issue: issue.number,
            labels: labels.to_vec(),
        });
        Ok(())
    }

    async fn remove_label(&self, issue: &IssueRef, label: &str) -> Result<(), Error> {
        self.record(Call::RemoveLabel {
            issue: issue.number,
            label: label.to_string(),
        });
        Ok(())
    }

    async fn get_label(&self, _repo: &RepoRef, name: &str) -> Result<Option<Label>, Error> {
        Ok(self.repo_labels.get(name).map(|n| Label::new(n.clone())))
    }

    async fn add_assignees(&self, issue: &IssueRef, assignees: &[String]) -> Result<(), Error> {
        self.record(Call::AddAssignees {
            issue: issue.number,
            assignees: assignees.to_vec(),
        });
        Ok(())
    }

    async fn get_issue(&self, issue: &IssueRef) -> Result<Option<Issue>, Error> {
        if self.failing_issues.contains(&issue.number) {
            return Err(Error::ApiError());
        }
        Ok(self.issues.get(&issue.number).cloned())
    }

    async fn create_issue(&self, _repo: &RepoRef, issue: &NewIssue) -> Result<Issue, Error> {
        self.record(Call::CreateIssue {
            title: issue.title.clone(),
            body: issue.body.clone(),
            labels: issue.labels.clone(),
        });
        let labels: Vec<&str> = issue.labels.iter().map(String::as_str).collect();
        Ok(issue_fixture(1000, &issue.title, &labels))
    }

    async fn update_issue_state(&self, issue: &IssueRef, state: IssueState) -> Result<(), Error> {
        self.record(Call::UpdateIssueState {
            issue: issue.number,
            state,
        });
        Ok(())
    }

    async fn lock_issue(&self, issue: &IssueRef) -> Result<(), Error> {
        self.record(Call::LockIssue {
            issue: issue.number,
        });
        Ok(())
    }

    async fn list_issue_events(&self, issue: &IssueRef) -> Result<Vec<IssueEvent>, Error> {
        Ok(self
            .issue_events
            .get(&issue.number)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_comments(&self, issue: &IssueRef) -> Result<Vec<Comment>, Error> {
        Ok(self.comments.get(&issue.number).cloned().unwrap_or_default())
    }

    async fn create_comment(&self, issue: &IssueRef, body: &str) -> Result<Comment, Error> {
        if self.failing_issues.contains(&issue.number) {
            return Err(Error::ApiError());
        }
        self.record(Call::CreateComment {
            issue: issue.number,
            body: body.to_string(),
        });
        Ok(comment_fixture(9000, BOT_LOGIN, body))
    }

    async fn delete_comment(&self, _repo: &RepoRef, comment_id: u64) -> Result<(), Error> {
        self.record(Call::DeleteComment { comment_id });
        Ok(())
    }

    async fn search_issues(&self, query: &str) -> Result<Vec<Issue>, Error> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self
            .search_results
            .iter()
            .find(|(fragment, _)| query.contains(fragment.as_str()))
            .map(|(_, issues)| issues.clone())
            .unwrap_or_default())
    }

    async fn list_open_pull_requests(&self, _repo: &RepoRef) -> Result<Vec<PullRequest>, Error> {
        Ok(self.open_pull_requests.clone())
    }

    async fn list_pull_request_commits(&self, pr: &IssueRef) -> Result<Vec<Commit>, Error> {
        Ok(self.commits.get(&pr.number).cloned().unwrap_or_default())
    }

    async fn list_pull_request_files(&self, pr: &IssueRef) -> Result<Vec<PullRequestFile>, Error> {
        Ok(self.files.get(&pr.number).cloned().unwrap_or_default())
    }

    async fn list_reviews(&self, pr: &IssueRef) -> Result<Vec<Review>, Error> {
        Ok(self.reviews.get(&pr.number).cloned().unwrap_or_default())
    }

    async fn create_commit_status(
        &self,
        _repo: &RepoRef,
        sha: &str,
        status: &NewCommitStatus,
    ) -> Result<(), Error> {
        self.record(Call::CreateCommitStatus {
            sha: sha.to_string(),
            state: status.state,
            context: status.context.clone(),
            description: status.description.clone(),
            target_url: status.target_url.clone(),
        });
        Ok(())
    }

    async fn get_combined_status(&self, _repo: &RepoRef, sha: &str) -> Result<CombinedStatus, Error> {
        Ok(self
            .combined_statuses
            .get(sha)
            .cloned()
            .unwrap_or_else(|| CombinedStatus {
                state: StatusState::Pending,
                sha: sha.to_string(),
                statuses: Vec::new(),
            }))
    }

    async fn list_team_members(&self, _org: &str, _team_slug: &str) -> Result<Vec<User>, Error> {
        Ok(self.team_members.clone())
    }
}

pub fn settings() -> BotSettings {
    BotSettings {
        bot_login: BOT_LOGIN.to_string(),
        ..BotSettings::default()
    }
}

pub fn repository_json() -> Value {
    json!({
        "name": REPO,
        "full_name": format!("{OWNER}/{REPO}"),
        "owner": { "login": OWNER, "type": "Organization" }
    })
}

pub fn issue_fixture(number: u64, title: &str, labels: &[&str]) -> Issue {
    Issue {
        number,
        title: title.to_string(),
        body: None,
        state: "open".to_string(),
        labels: labels.iter().map(|l| Label::new(*l)).collect(),
        user: User::new("reporter"),
        html_url: format!("https://github.com/{OWNER}/{REPO}/issues/{number}"),
        locked: false,
        pull_request: None,
    }
}

pub fn pull_request_fixture(number: u64, title: &str, sha: &str, labels: &[&str]) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        state: "open".to_string(),
        html_url: format!("https://github.com/{OWNER}/{REPO}/pull/{number}"),
        user: User::new("contributor"),
        labels: labels.iter().map(|l| Label::new(*l)).collect(),
        head: GitRef {
            sha: sha.to_string(),
            ref_name: "feature".to_string(),
        },
        draft: false,
    }
}

pub fn commit_fixture(sha: &str, message: &str) -> Commit {
    Commit {
        sha: sha.to_string(),
        commit: CommitDetails {
            message: message.to_string(),
        },
    }
}

pub fn comment_fixture(id: u64, login: &str, body: &str) -> Comment {
    Comment {
        id,
        body: body.to_string(),
        user: User::new(login),
    }
}

/// A review submitted `minute` minutes after a fixed reference time.
pub fn review_fixture(id: u64, login: &str, state: ReviewState, minute: i64) -> Review {
    let base: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    Review {
        id,
        user: Some(User::new(login)),
        state,
        submitted_at: Some(base + Duration::minutes(minute)),
    }
}

pub fn issues_event(action: &str, issue: &Issue, label: Option<&str>) -> Event {
    Event::new(
        EventName::Issues,
        "delivery-issues",
        json!({
            "action": action,
            "issue": issue,
            "label": label.map(|l| json!({ "name": l })),
            "repository": repository_json(),
            "sender": { "login": "maintainer" }
        }),
    )
}

pub fn pull_request_event(action: &str, pr: &PullRequest) -> Event {
    Event::new(
        EventName::PullRequest,
        "delivery-pr",
        json!({
            "action": action,
            "number": pr.number,
            "pull_request": pr,
            "repository": repository_json(),
            "sender": { "login": "contributor" }
        }),
    )
}
