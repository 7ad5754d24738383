//! Checks the commit message (or title) of a pull request against the
//! repository's tag convention and reports the result as a commit status.

use async_trait::async_trait;
use github_client::{NewCommitStatus, StatusState};
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::conventions::{check_message, effective_message, MessageCheck};
use crate::{
    EventContext, EventName, EventPattern, Plugin, PullRequestEvent, Registration, StewardResult,
};

#[cfg(test)]
#[path = "commit_message_tests.rs"]
mod tests;

pub const STATUS_CONTEXT: &str = "commit-message";

const SUCCESS_DESCRIPTION: &str = "Commit message follows guidelines";

pub struct CommitMessagePlugin;

pub fn registration() -> Registration {
    Registration::new(
        EventPattern::actions(
            EventName::PullRequest,
            &["opened", "reopened", "synchronize", "edited"],
        ),
        Arc::new(CommitMessagePlugin),
    )
}

fn failure_description(failures: &[MessageCheck]) -> String {
    let problems: Vec<&str> = failures.iter().map(MessageCheck::description).collect();
    format!("Commit message problems: {}", problems.join("; "))
}

#[async_trait]
impl Plugin for CommitMessagePlugin {
    fn name(&self) -> &'static str {
        "commit-message"
    }

    #[instrument(skip_all, fields(plugin = "commit-message"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let payload: PullRequestEvent = ctx.event.parse()?;
        let repo = payload.repository.repo_ref();
        let settings = &ctx.settings.commit_message;

        if settings.is_excluded(&repo.full_name()) {
            debug!(repo = %repo, "Repository excluded from commit message checks");
            return Ok(());
        }

        let commits = ctx
            .github
            .list_pull_request_commits(&repo.issue(payload.number))
            .await?;
        let Some(latest) = commits.last() else {
            return Ok(());
        };

        let message = effective_message(&commits, &payload.pull_request.title);
        let failures = check_message(message, settings.convention);

        let status = if failures.is_empty() {
            NewCommitStatus::new(StatusState::Success, STATUS_CONTEXT, SUCCESS_DESCRIPTION)
        } else {
            debug!(number = payload.number, failures = ?failures, "Commit message rejected");
            let status = NewCommitStatus::new(
                StatusState::Failure,
                STATUS_CONTEXT,
                failure_description(&failures),
            );
            match &settings.guidelines_url {
                Some(url) => status.with_target_url(url.as_str()),
                None => status,
            }
        };

        ctx.github
            .create_commit_status(&repo, &latest.sha, &status)
            .await?;

        Ok(())
    }
}
