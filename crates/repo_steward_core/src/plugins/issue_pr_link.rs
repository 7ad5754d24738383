//! Comments on issues that a pull request title says it fixes.

use async_trait::async_trait;
use github_client::{IssueRef, PullRequest};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::{debug, instrument, warn};

use crate::comment_tag::{has_tag, with_tag};
use crate::{
    EventContext, EventName, EventPattern, Plugin, PullRequestEvent, Registration, StewardResult,
};

#[cfg(test)]
#[path = "issue_pr_link_tests.rs"]
mod tests;

/// Most issues linked from one pull request.
pub const MAX_LINKED_ISSUES: usize = 3;

static ISSUE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:close[sd]?|fix(?:e[sd])?|resolve[sd]?)\s+#(\d+)")
        .expect("issue reference pattern is a valid regex")
});

pub struct IssuePrLinkPlugin;

pub fn registration() -> Registration {
    Registration::new(
        EventPattern::actions(EventName::PullRequest, &["opened", "edited"]),
        Arc::new(IssuePrLinkPlugin),
    )
}

/// Issue numbers closed by a title, deduplicated, in order of first appearance.
pub fn referenced_issues(title: &str) -> Vec<u64> {
    let mut numbers = Vec::new();
    for captures in ISSUE_REFERENCE.captures_iter(title) {
        let Ok(number) = captures[1].parse::<u64>() else {
            continue;
        };
        if !numbers.contains(&number) {
            numbers.push(number);
        }
        if numbers.len() == MAX_LINKED_ISSUES {
            break;
        }
    }
    numbers
}

fn comment_tag(pr_number: u64) -> String {
    format!("issue-pr-link-{}", pr_number)
}

fn comment_body(pr: &PullRequest) -> String {
    let body = format!(
        "Hi, everyone! A pull request addressing this issue has been opened by @{}: #{}\n\n\
         Feedback on the proposed change is welcome there.",
        pr.user.login, pr.number
    );
    with_tag(&body, &comment_tag(pr.number))
}

impl IssuePrLinkPlugin {
    async fn link(&self, ctx: &EventContext<'_>, issue: &IssueRef, pr: &PullRequest) -> StewardResult<()> {
        let Some(found) = ctx.github.get_issue(issue).await? else {
            debug!(issue = %issue, "Referenced issue does not exist");
            return Ok(());
        };
        if !found.is_open() || found.is_pull_request() {
            return Ok(());
        }

        let tag = comment_tag(pr.number);
        let comments = ctx.github.list_comments(issue).await?;
        let already_linked = comments
            .iter()
            .any(|c| c.user.login == ctx.settings.bot_login && has_tag(&c.body, &tag));
        if already_linked {
            return Ok(());
        }

        ctx.github.create_comment(issue, &comment_body(pr)).await?;
        Ok(())
    }
}

#[async_trait]
impl Plugin for IssuePrLinkPlugin {
    fn name(&self) -> &'static str {
        "issue-pr-link"
    }

    #[instrument(skip_all, fields(plugin = "issue-pr-link"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let payload: PullRequestEvent = ctx.event.parse()?;
        let repo = payload.repository.repo_ref();

        for number in referenced_issues(&payload.pull_request.title) {
            let issue = repo.issue(number);
            if let Err(e) = self.link(ctx, &issue, &payload.pull_request).await {
                warn!(issue = %issue, error = %e, "Failed to link pull request to issue");
            }
        }

        Ok(())
    }
}
