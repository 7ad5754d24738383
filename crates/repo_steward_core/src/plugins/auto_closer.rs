//! Closes stale issues during repository sweeps.
//!
//! Proposals that are still being evaluated after 21 days and issues waiting
//! for information for 7 days are closed with an explanation. Repositories
//! opt in by defining the `auto closed` label.

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use github_client::{Issue, IssueState, RepoRef};
use std::sync::Arc;
use tracing::{info, instrument};

use super::sweep::{cutoff_date, is_opted_in, log_failures};
use crate::comment_tag::with_tag;
use crate::event::SWEEP_ACTION;
use crate::{EventContext, EventName, EventPattern, Plugin, Registration, StewardResult};

#[cfg(test)]
#[path = "auto_closer_tests.rs"]
mod tests;

pub const AUTO_CLOSED_LABEL: &str = "auto closed";

const ACCEPTANCE_DAYS: i64 = 21;
const NEEDS_INFO_DAYS: i64 = 7;

const COMMENT_TAG: &str = "auto-close";

const NOT_ACCEPTED_COMMENT: &str = "Unfortunately, it looks like there wasn't enough interest from \
the team or community to implement this change. While we wish we could accommodate everyone's \
requests, we do need to prioritize. Issues that are not accepted within 21 days rarely are, so \
we close them. This doesn't mean the idea isn't interesting or useful, just that it's not \
something the team can commit to.\n\nThanks for contributing and for your understanding.";

const NEEDS_INFO_COMMENT: &str = "It looks like there wasn't enough information for us to know \
how to help you, so we're closing the issue.\n\nThanks for your understanding.";

pub struct AutoCloserPlugin;

pub fn registration() -> Registration {
    Registration::new(
        vec![EventPattern::new(EventName::Schedule, SWEEP_ACTION)],
        Arc::new(AutoCloserPlugin),
    )
}

/// Search queries paired with the comment posted on the issues they find.
pub fn queries(repo: &RepoRef, now: chrono::DateTime<Utc>) -> Vec<(String, &'static str)> {
    vec![
        (
            format!(
                "repo:{} is:open is:issue label:evaluating -label:accepted updated:<={}",
                repo.full_name(),
                cutoff_date(now, ACCEPTANCE_DAYS)
            ),
            NOT_ACCEPTED_COMMENT,
        ),
        (
            format!(
                "repo:{} is:open is:issue label:\"needs info\" updated:<={}",
                repo.full_name(),
                cutoff_date(now, NEEDS_INFO_DAYS)
            ),
            NEEDS_INFO_COMMENT,
        ),
    ]
}

async fn close_issue(ctx: &EventContext<'_>, repo: &RepoRef, issue: &Issue, comment: &str) -> usize {
    let target = repo.issue(issue.number);
    let body = with_tag(comment, COMMENT_TAG);
    let label = [AUTO_CLOSED_LABEL.to_string()];

    let (closed, labeled, commented) = futures::join!(
        ctx.github.update_issue_state(&target, IssueState::Closed),
        ctx.github.add_labels(&target, &label),
        ctx.github.create_comment(&target, &body),
    );

    log_failures(
        &target,
        &[
            ("close", closed),
            ("label", labeled),
            ("comment", commented.map(|_| ())),
        ],
    )
}

#[async_trait]
impl Plugin for AutoCloserPlugin {
    fn name(&self) -> &'static str {
        "auto-closer"
    }

    #[instrument(skip_all, fields(plugin = "auto-closer"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let repo = ctx.repo()?;
        if !is_opted_in(ctx, &repo, AUTO_CLOSED_LABEL).await? {
            return Ok(());
        }

        for (query, comment) in queries(&repo, Utc::now()) {
            let issues = ctx.github.search_issues(&query).await?;
            let failures: usize = join_all(
                issues
                    .iter()
                    .map(|issue| close_issue(ctx, &repo, issue, comment)),
            )
            .await
            .into_iter()
            .sum();

            info!(
                repo = %repo,
                closed = issues.len(),
                failures,
                "Auto-closed stale issues"
            );
        }

        Ok(())
    }
}
