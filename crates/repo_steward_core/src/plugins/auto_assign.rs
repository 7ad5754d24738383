//! Assigns an issue to its author when they offer to submit a pull request.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    EventContext, EventName, EventPattern, IssuesEvent, Plugin, Registration, StewardResult,
};

#[cfg(test)]
#[path = "auto_assign_tests.rs"]
mod tests;

/// Checked box of the issue template, compared against the lowercased body.
const WILLING_TO_SUBMIT_PR: &str = "- [x] i am willing to submit a pull request";

pub struct AutoAssignPlugin;

pub fn registration() -> Registration {
    Registration::new(
        vec![EventPattern::new(EventName::Issues, "opened")],
        Arc::new(AutoAssignPlugin),
    )
}

fn is_willing_to_submit_pr(body: &str) -> bool {
    body.to_lowercase().contains(WILLING_TO_SUBMIT_PR)
}

#[async_trait]
impl Plugin for AutoAssignPlugin {
    fn name(&self) -> &'static str {
        "auto-assign"
    }

    #[instrument(skip_all, fields(plugin = "auto-assign"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let payload: IssuesEvent = ctx.event.parse()?;

        if !is_willing_to_submit_pr(payload.issue.body_text()) {
            return Ok(());
        }

        let author = payload.issue.user.login.clone();
        let issue = payload.repository.repo_ref().issue(payload.issue.number);
        ctx.github
            .add_assignees(&issue, std::slice::from_ref(&author))
            .await?;

        info!(number = issue.number, author = %author, "Assigned issue to its author");
        Ok(())
    }
}
