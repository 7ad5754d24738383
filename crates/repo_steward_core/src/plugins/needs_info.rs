//! Asks the author of an issue labeled `needs info` for more details.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::comment_tag::with_tag;
use crate::{
    EventContext, EventName, EventPattern, IssuesEvent, Plugin, Registration, StewardResult,
};

#[cfg(test)]
#[path = "needs_info_tests.rs"]
mod tests;

pub const NEEDS_INFO_LABEL: &str = "needs info";

const COMMENT_TAG: &str = "needs-info";

pub struct NeedsInfoPlugin;

pub fn registration() -> Registration {
    Registration::new(
        vec![EventPattern::new(EventName::Issues, "labeled")],
        Arc::new(NeedsInfoPlugin),
    )
}

fn comment_body(author: &str) -> String {
    let body = format!(
        "Hi @{author}, thanks for the issue. It looks like there's not enough \
         information for us to know how to help you.\n\n\
         If you're reporting a bug, please be sure to include:\n\n\
         1. The version you are using\n\
         2. The configuration you are using\n\
         3. The code or input that triggers the problem\n\
         4. What you expected to happen\n\
         5. What actually happened, including any error output\n\n\
         If you're requesting a change, please be sure to include:\n\n\
         1. The problem you want to solve\n\
         2. Your take on the correct solution to the problem\n\n\
         Thanks!"
    );
    with_tag(&body, COMMENT_TAG)
}

#[async_trait]
impl Plugin for NeedsInfoPlugin {
    fn name(&self) -> &'static str {
        "needs-info"
    }

    #[instrument(skip_all, fields(plugin = "needs-info"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let payload: IssuesEvent = ctx.event.parse()?;

        let added = payload.label.as_ref().map(|l| l.name.as_str());
        if added != Some(NEEDS_INFO_LABEL) {
            return Ok(());
        }

        let issue = payload.repository.repo_ref().issue(payload.issue.number);
        ctx.github
            .create_comment(&issue, &comment_body(&payload.issue.user.login))
            .await?;

        Ok(())
    }
}
