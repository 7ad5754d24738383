//! Blocks work-in-progress pull requests with a pending `wip` status.

use async_trait::async_trait;
use github_client::{NewCommitStatus, PullRequest, StatusState};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, instrument};

use crate::{
    EventContext, EventName, EventPattern, Plugin, PullRequestEvent, Registration, StewardResult,
};

#[cfg(test)]
#[path = "wip_tests.rs"]
mod tests;

pub const STATUS_CONTEXT: &str = "wip";

pub const DO_NOT_MERGE_LABEL: &str = "do not merge";

static WIP_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^WIP:|\(WIP\)").expect("WIP pattern is a valid regex"));

pub struct WipPlugin;

pub fn registration() -> Registration {
    Registration::new(
        EventPattern::actions(
            EventName::PullRequest,
            &["opened", "reopened", "edited", "labeled", "unlabeled", "synchronize"],
        ),
        Arc::new(WipPlugin),
    )
}

pub fn is_work_in_progress(pr: &PullRequest) -> bool {
    WIP_TITLE.is_match(&pr.title) || pr.has_label(DO_NOT_MERGE_LABEL)
}

#[async_trait]
impl Plugin for WipPlugin {
    fn name(&self) -> &'static str {
        "wip"
    }

    #[instrument(skip_all, fields(plugin = "wip"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let payload: PullRequestEvent = ctx.event.parse()?;
        let repo = payload.repository.repo_ref();
        let sha = payload.pull_request.head.sha.as_str();

        if is_work_in_progress(&payload.pull_request) {
            let status = NewCommitStatus::new(
                StatusState::Pending,
                STATUS_CONTEXT,
                "This PR is a work in progress",
            );
            ctx.github.create_commit_status(&repo, sha, &status).await?;
            return Ok(());
        }

        let combined = ctx.github.get_combined_status(&repo, sha).await?;
        if !combined.has_context(STATUS_CONTEXT) {
            debug!(number = payload.number, "Pull request was never marked WIP");
            return Ok(());
        }

        let status = NewCommitStatus::new(
            StatusState::Success,
            STATUS_CONTEXT,
            "This PR is no longer a work in progress",
        );
        ctx.github.create_commit_status(&repo, sha, &status).await?;

        Ok(())
    }
}
