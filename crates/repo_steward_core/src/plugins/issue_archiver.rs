//! Locks issues that have been closed for a long time.

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use github_client::{Issue, RepoRef};
use std::sync::Arc;
use tracing::{info, instrument};

use super::sweep::{cutoff_date, is_opted_in, log_failures};
use crate::event::SWEEP_ACTION;
use crate::{EventContext, EventName, EventPattern, Plugin, Registration, StewardResult};

#[cfg(test)]
#[path = "issue_archiver_tests.rs"]
mod tests;

pub const ARCHIVED_LABEL: &str = "archived due to age";

const ARCHIVE_AFTER_DAYS: i64 = 180;

pub struct IssueArchiverPlugin;

pub fn registration() -> Registration {
    Registration::new(
        vec![EventPattern::new(EventName::Schedule, SWEEP_ACTION)],
        Arc::new(IssueArchiverPlugin),
    )
}

pub fn query(repo: &RepoRef, now: chrono::DateTime<Utc>) -> String {
    format!(
        "repo:{} is:closed is:unlocked updated:<={}",
        repo.full_name(),
        cutoff_date(now, ARCHIVE_AFTER_DAYS)
    )
}

async fn archive_issue(ctx: &EventContext<'_>, repo: &RepoRef, issue: &Issue) -> usize {
    let target = repo.issue(issue.number);
    let label = [ARCHIVED_LABEL.to_string()];

    let (locked, labeled) = futures::join!(
        ctx.github.lock_issue(&target),
        ctx.github.add_labels(&target, &label),
    );

    log_failures(&target, &[("lock", locked), ("label", labeled)])
}

#[async_trait]
impl Plugin for IssueArchiverPlugin {
    fn name(&self) -> &'static str {
        "issue-archiver"
    }

    #[instrument(skip_all, fields(plugin = "issue-archiver"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let repo = ctx.repo()?;
        if !is_opted_in(ctx, &repo, ARCHIVED_LABEL).await? {
            return Ok(());
        }

        let issues = ctx.github.search_issues(&query(&repo, Utc::now())).await?;
        let failures: usize = join_all(issues.iter().map(|issue| archive_issue(ctx, &repo, issue)))
            .await
            .into_iter()
            .sum();

        info!(repo = %repo, archived = issues.len(), failures, "Archived old issues");
        Ok(())
    }
}
