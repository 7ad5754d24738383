//! Reminds contributors to add tests when a pull request touches no test directory.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::comment_tag::with_tag;
use crate::conventions::is_chore_title;
use crate::{
    EventContext, EventName, EventPattern, Plugin, PullRequestEvent, Registration, StewardResult,
};

#[cfg(test)]
#[path = "check_unit_test_tests.rs"]
mod tests;

const COMMENT_TAG: &str = "check-unit-test";

pub struct CheckUnitTestPlugin;

pub fn registration() -> Registration {
    Registration::new(
        EventPattern::actions(EventName::PullRequest, &["opened", "reopened", "synchronize"]),
        Arc::new(CheckUnitTestPlugin),
    )
}

/// Directory of a repository-relative path; empty for files at the root.
fn directory_of(filename: &str) -> &str {
    filename
        .rsplit_once('/')
        .map(|(dir, _)| dir)
        .unwrap_or_default()
}

fn comment_body(sender: &str) -> String {
    let body = format!(
        "Hi @{sender}, thanks for the pull request!\n\n\
         It looks like none of the changed files are in a test directory. \
         Please add or update tests that cover this change. If tests are not \
         needed, let us know why in a comment."
    );
    with_tag(&body, COMMENT_TAG)
}

#[async_trait]
impl Plugin for CheckUnitTestPlugin {
    fn name(&self) -> &'static str {
        "check-unit-test"
    }

    #[instrument(skip_all, fields(plugin = "check-unit-test"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let payload: PullRequestEvent = ctx.event.parse()?;

        if is_chore_title(
            &payload.pull_request.title,
            ctx.settings.commit_message.convention,
        ) {
            debug!(number = payload.number, "Chore pull request, tests not expected");
            return Ok(());
        }

        let pr = payload.repository.repo_ref().issue(payload.number);
        let files = ctx.github.list_pull_request_files(&pr).await?;

        let touches_tests = files
            .iter()
            .any(|f| directory_of(&f.filename).contains("test"));
        if touches_tests {
            return Ok(());
        }

        ctx.github
            .create_comment(&pr, &comment_body(&payload.sender.login))
            .await?;

        Ok(())
    }
}
