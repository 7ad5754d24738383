//! Deletes older copies of tagged bot comments so only the newest one remains.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::comment_tag::extract_tag;
use crate::{
    EventContext, EventName, EventPattern, IssueCommentEvent, Plugin, Registration,
    StewardResult,
};
use github_client::Comment;

#[cfg(test)]
#[path = "duplicate_comments_tests.rs"]
mod tests;

pub struct DuplicateCommentsPlugin;

pub fn registration() -> Registration {
    Registration::new(
        vec![EventPattern::new(EventName::IssueComment, "created")],
        Arc::new(DuplicateCommentsPlugin),
    )
}

/// Returns the ids of the bot comments to delete: for every hidden tag that
/// appears more than once, all but the last comment carrying it.
///
/// `comments` must be in the order returned by the API.
pub fn duplicate_comment_ids(comments: &[Comment], bot_login: &str) -> Vec<u64> {
    let mut by_tag: HashMap<&str, Vec<u64>> = HashMap::new();
    let mut tag_order: Vec<&str> = Vec::new();

    for comment in comments.iter().filter(|c| c.user.login == bot_login) {
        let Some(tag) = extract_tag(&comment.body) else {
            continue;
        };
        let ids = by_tag.entry(tag).or_default();
        if ids.is_empty() {
            tag_order.push(tag);
        }
        ids.push(comment.id);
    }

    tag_order
        .into_iter()
        .flat_map(|tag| {
            let ids = &by_tag[tag];
            ids[..ids.len() - 1].to_vec()
        })
        .collect()
}

#[async_trait]
impl Plugin for DuplicateCommentsPlugin {
    fn name(&self) -> &'static str {
        "duplicate-comments"
    }

    #[instrument(skip_all, fields(plugin = "duplicate-comments"))]
    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()> {
        let payload: IssueCommentEvent = ctx.event.parse()?;
        if !payload.issue.is_open() {
            return Ok(());
        }

        let repo = payload.repository.repo_ref();
        let comments = ctx
            .github
            .list_comments(&repo.issue(payload.issue.number))
            .await?;

        let duplicates = duplicate_comment_ids(&comments, &ctx.settings.bot_login);
        for comment_id in &duplicates {
            if let Err(e) = ctx.github.delete_comment(&repo, *comment_id).await {
                warn!(comment_id, error = %e, "Failed to delete duplicate comment");
            }
        }

        if !duplicates.is_empty() {
            info!(
                number = payload.issue.number,
                count = duplicates.len(),
                "Pruned duplicate bot comments"
            );
        }
        Ok(())
    }
}
