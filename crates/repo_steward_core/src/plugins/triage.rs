//! Labels new issues that have no labels with `triage`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::{
    EventContext, EventName, EventPattern, IssuesEvent, Plugin, Registration, StewardResult,
};

#[cfg(test)]
#[path = "triage_tests.rs"]
mod tests;

pub const TRIAGE_LABEL: &str = "triage";

pub struct TriagePlugin;

pub fn registration() -> Registration {
    Registration::new(
        EventPattern::actions(EventName::Issues, &["opened", "reopened"]),
        Arc::new(TriagePlugin),
    )
}

#[async_trait]
impl Plugin for TriagePlugin {
    fn name(&self) -> &'static str {
        "triage"
    }

    #[instrument(skip_all, fields(plugin = "triage"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let payload: IssuesEvent = ctx.event.parse()?;

        if !payload.issue.labels.is_empty() {
            debug!(number = payload.issue.number, "Issue already labeled");
            return Ok(());
        }

        let issue = payload.repository.repo_ref().issue(payload.issue.number);
        ctx.github
            .add_labels(&issue, &[TRIAGE_LABEL.to_string()])
            .await?;

        Ok(())
    }
}
