//! Helpers shared by the scheduled sweepers.

use chrono::{DateTime, Duration, Utc};
use github_client::{Error, IssueRef, RepoRef};
use tracing::{debug, warn};

use crate::{EventContext, StewardResult};

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;

/// Date `days` before `now`, in the `YYYY-MM-DD` form GitHub search expects.
pub fn cutoff_date(now: DateTime<Utc>, days: i64) -> String {
    (now - Duration::days(days)).format("%Y-%m-%d").to_string()
}

/// Repositories opt in to a sweeper by defining its label.
pub async fn is_opted_in(ctx: &EventContext<'_>, repo: &RepoRef, label: &str) -> StewardResult<bool> {
    let found = ctx.github.get_label(repo, label).await?.is_some();
    if !found {
        debug!(repo = %repo, label, "Gate label missing, skipping sweep");
    }
    Ok(found)
}

/// Logs the failed mutations of one issue and returns how many failed.
pub fn log_failures(issue: &IssueRef, results: &[(&str, Result<(), Error>)]) -> usize {
    let mut failed = 0;
    for (operation, result) in results {
        if let Err(e) = result {
            warn!(issue = %issue, operation, error = %e, "Sweep mutation failed");
            failed += 1;
        }
    }
    failed
}
