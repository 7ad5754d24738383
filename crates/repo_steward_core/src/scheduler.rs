//! Periodic repository sweeps.
//!
//! Every interval the scheduler asks its [`RepositorySource`] for the
//! repositories to sweep and dispatches a `schedule.repository` event for
//! each, one repository at a time. Ticks that would fire while a sweep is
//! still running are skipped, so sweeps never overlap.

use async_trait::async_trait;
use github_client::{GitHubApi, RepoRef};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info, instrument};

use crate::{Dispatcher, Event, StewardResult};

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

/// A repository to sweep and the client authenticated for it.
pub struct SweepTarget {
    pub repo: RepoRef,
    pub github: Arc<dyn GitHubApi>,
}

/// Supplies the repositories the bot is installed on.
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn sweep_targets(&self) -> StewardResult<Vec<SweepTarget>>;
}

/// Outcome of one sweep over every repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub repositories: usize,
    pub failed_plugins: usize,
}

pub struct Scheduler {
    dispatcher: Arc<Dispatcher>,
    source: Arc<dyn RepositorySource>,
    period: Duration,
}

impl Scheduler {
    pub fn new(dispatcher: Arc<Dispatcher>, source: Arc<dyn RepositorySource>, period: Duration) -> Self {
        Self {
            dispatcher,
            source,
            period,
        }
    }

    /// Sweeps every repository once.
    #[instrument(skip(self))]
    pub async fn run_once(&self) -> StewardResult<SweepReport> {
        let targets = self.source.sweep_targets().await?;
        let mut report = SweepReport::default();

        for target in &targets {
            let event = Event::repository_sweep(&target.repo);
            let dispatched = self.dispatcher.dispatch(&event, target.github.as_ref()).await;
            report.repositories += 1;
            report.failed_plugins += dispatched.failed.len();
        }

        info!(
            repositories = report.repositories,
            failed_plugins = report.failed_plugins,
            "Repository sweep finished"
        );
        Ok(report)
    }

    /// Sweeps every `period` until `shutdown` completes. The first sweep runs
    /// one period after start.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(period_secs = self.period.as_secs(), "Sweep scheduler started");
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Sweep scheduler stopped");
                    return;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.run_once().await {
                        error!(error = %e, "Failed to list repositories for sweep");
                    }
                }
            }
        }
    }
}
