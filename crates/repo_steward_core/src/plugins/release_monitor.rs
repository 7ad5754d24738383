//! Reports on every open pull request whether it may be merged while a patch
//! release is pending.

use async_trait::async_trait;
use futures::future::join_all;
use github_client::{Issue, NewCommitStatus, PullRequest, RepoRef, StatusState};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::conventions::{effective_message, is_patch_message, CommitConvention};
use crate::plugins::recurring_issues::RELEASE_LABEL;
use crate::{
    EventContext, EventName, EventPattern, IssuesEvent, Plugin, Registration, StewardResult,
};

#[cfg(test)]
#[path = "release_monitor_tests.rs"]
mod tests;

pub const STATUS_CONTEXT: &str = "release-monitor";

pub const PATCH_RELEASE_PENDING_LABEL: &str = "patch release pending";

const NO_PENDING_RELEASE: &str = "No patch release is pending";
const SEMVER_PATCH: &str = "This change is semver-patch";
const PENDING_RELEASE: &str = "A patch release is pending";

pub struct ReleaseMonitorPlugin;

pub fn registration() -> Registration {
    let mut patterns = EventPattern::actions(EventName::Issues, &["labeled", "closed"]);
    patterns.extend(EventPattern::actions(
        EventName::PullRequest,
        &["opened", "reopened", "synchronize", "edited"],
    ));
    Registration::new(patterns, Arc::new(ReleaseMonitorPlugin))
}

/// Decides the status of one pull request.
fn status_for(
    pending_release: Option<&Issue>,
    message: &str,
    convention: CommitConvention,
) -> NewCommitStatus {
    match pending_release {
        None => NewCommitStatus::new(StatusState::Success, STATUS_CONTEXT, NO_PENDING_RELEASE),
        Some(release) if is_patch_message(message, convention) => {
            NewCommitStatus::new(StatusState::Success, STATUS_CONTEXT, SEMVER_PATCH)
                .with_target_url(release.html_url.as_str())
        }
        Some(release) => NewCommitStatus::new(StatusState::Pending, STATUS_CONTEXT, PENDING_RELEASE)
            .with_target_url(release.html_url.as_str()),
    }
}

/// Whether an event can change the pending-release condition.
fn is_relevant(ctx: &EventContext<'_>) -> StewardResult<bool> {
    if ctx.event.name != EventName::Issues {
        return Ok(true);
    }

    let payload: IssuesEvent = ctx.event.parse()?;
    Ok(match payload.action.as_str() {
        "labeled" => payload
            .label
            .as_ref()
            .is_some_and(|l| l.name == PATCH_RELEASE_PENDING_LABEL),
        "closed" => payload.issue.has_label(RELEASE_LABEL),
        _ => false,
    })
}

async fn pending_release_issue(ctx: &EventContext<'_>, repo: &RepoRef) -> StewardResult<Option<Issue>> {
    let query = format!(
        "repo:{} is:open is:issue label:{} label:\"{}\"",
        repo.full_name(),
        RELEASE_LABEL,
        PATCH_RELEASE_PENDING_LABEL
    );
    let results = ctx.github.search_issues(&query).await?;
    Ok(results.into_iter().next())
}

async fn update_pull_request(
    ctx: &EventContext<'_>,
    repo: &RepoRef,
    pr: &PullRequest,
    pending_release: Option<&Issue>,
) -> StewardResult<()> {
    let commits = ctx
        .github
        .list_pull_request_commits(&repo.issue(pr.number))
        .await?;
    let message = effective_message(&commits, &pr.title);
    let status = status_for(
        pending_release,
        message,
        ctx.settings.commit_message.convention,
    );

    ctx.github
        .create_commit_status(repo, &pr.head.sha, &status)
        .await?;
    Ok(())
}

#[async_trait]
impl Plugin for ReleaseMonitorPlugin {
    fn name(&self) -> &'static str {
        "release-monitor"
    }

    #[instrument(skip_all, fields(plugin = "release-monitor"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        if !is_relevant(ctx)? {
            return Ok(());
        }

        let repo = ctx.repo()?;
        let pending_release = pending_release_issue(ctx, &repo).await?;
        let pull_requests = ctx.github.list_open_pull_requests(&repo).await?;

        let results = join_all(
            pull_requests
                .iter()
                .map(|pr| update_pull_request(ctx, &repo, pr, pending_release.as_ref())),
        )
        .await;

        for (pr, result) in pull_requests.iter().zip(results) {
            if let Err(e) = result {
                warn!(number = pr.number, error = %e, "Failed to update release status");
            }
        }

        info!(
            pending = pending_release.is_some(),
            pull_requests = pull_requests.len(),
            "Updated release monitor statuses"
        );
        Ok(())
    }
}
