//! Maintains the `ready to merge` label.
//!
//! A pull request is ready when at least one reviewer's latest verdict is an
//! approval and the statuses of its commits are green. Both halves are read
//! from the API on every trigger; nothing is remembered between events.

use async_trait::async_trait;
use github_client::{GitHubApi, IssueRef, RepoRef, Review, ReviewState, StatusState};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::{
    EventContext, EventName, EventPattern, Plugin, PullRequestReviewEvent, Registration,
    StatusEvent, StewardResult,
};

#[cfg(test)]
#[path = "ready_to_merge_tests.rs"]
mod tests;

pub const READY_TO_MERGE_LABEL: &str = "ready to merge";

pub struct ReadyToMergePlugin;

pub fn registration() -> Registration {
    let mut patterns = vec![EventPattern::any(EventName::Status)];
    patterns.extend(EventPattern::actions(
        EventName::PullRequestReview,
        &["submitted", "dismissed"],
    ));
    Registration::new(patterns, Arc::new(ReadyToMergePlugin))
}

/// Returns true if at least one reviewer's latest approve/request-changes
/// verdict is an approval.
///
/// Reviews are ordered by submission time; reviews submitted at the same
/// time keep their API order.
pub fn has_approval(reviews: &[Review]) -> bool {
    let mut ordered: Vec<&Review> = reviews.iter().collect();
    ordered.sort_by_key(|r| r.submitted_at);

    let mut verdicts: HashMap<&str, &ReviewState> = HashMap::new();
    for review in ordered {
        let Some(user) = &review.user else {
            continue;
        };
        if matches!(
            review.state,
            ReviewState::Approved | ReviewState::ChangesRequested
        ) {
            verdicts.insert(user.login.as_str(), &review.state);
        }
    }

    verdicts.values().any(|s| **s == ReviewState::Approved)
}

/// Finds the open pull request whose head is `sha`.
async fn find_pull_request(
    github: &dyn GitHubApi,
    repo: &RepoRef,
    sha: &str,
) -> StewardResult<Option<IssueRef>> {
    let query = format!("{} is:open is:pr repo:{}", sha, repo.full_name());
    let results = github.search_issues(&query).await?;
    Ok(results.first().map(|issue| repo.issue(issue.number)))
}

async fn all_commits_green(github: &dyn GitHubApi, pr: &IssueRef) -> StewardResult<bool> {
    let repo = pr.repo_ref();
    let commits = github.list_pull_request_commits(pr).await?;
    if commits.is_empty() {
        return Ok(false);
    }

    for commit in &commits {
        let combined = github.get_combined_status(&repo, &commit.sha).await?;
        if combined.state != StatusState::Success {
            debug!(sha = %commit.sha, state = combined.state.as_str(), "Commit status is not green");
            return Ok(false);
        }
    }
    Ok(true)
}

async fn add_label(github: &dyn GitHubApi, pr: &IssueRef) -> StewardResult<()> {
    github
        .add_labels(pr, &[READY_TO_MERGE_LABEL.to_string()])
        .await?;
    info!(pr = %pr, "Pull request is ready to merge");
    Ok(())
}

impl ReadyToMergePlugin {
    async fn handle_status(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let payload: StatusEvent = ctx.event.parse()?;
        let repo = payload.repository.repo_ref();

        match payload.state {
            StatusState::Success => {
                let Some(pr) = find_pull_request(ctx.github, &repo, &payload.sha).await? else {
                    return Ok(());
                };
                let reviews = ctx.github.list_reviews(&pr).await?;
                if has_approval(&reviews) {
                    add_label(ctx.github, &pr).await?;
                }
            }
            StatusState::Failure | StatusState::Error => {
                if let Some(pr) = find_pull_request(ctx.github, &repo, &payload.sha).await? {
                    ctx.github.remove_label(&pr, READY_TO_MERGE_LABEL).await?;
                }
            }
            StatusState::Pending => {}
        }
        Ok(())
    }

    async fn handle_review(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let payload: PullRequestReviewEvent = ctx.event.parse()?;
        let pr = payload
            .repository
            .repo_ref()
            .issue(payload.pull_request.number);

        if payload.action == "submitted" && payload.review.state == ReviewState::Approved {
            if all_commits_green(ctx.github, &pr).await? {
                add_label(ctx.github, &pr).await?;
            }
        } else {
            ctx.github.remove_label(&pr, READY_TO_MERGE_LABEL).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Plugin for ReadyToMergePlugin {
    fn name(&self) -> &'static str {
        "ready-to-merge"
    }

    #[instrument(skip_all, fields(plugin = "ready-to-merge"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        match ctx.event.name {
            EventName::Status => self.handle_status(ctx).await,
            EventName::PullRequestReview => self.handle_review(ctx).await,
            _ => Ok(()),
        }
    }
}
