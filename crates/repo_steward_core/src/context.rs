//! The context a plugin receives for one event.

use github_client::{GitHubApi, RepoRef};

use crate::{BotSettings, Event, StewardResult};

/// Everything a plugin may use while handling one event.
///
/// The GitHub client is authenticated for the repository the event belongs
/// to; plugins do not choose credentials.
#[derive(Clone, Copy)]
pub struct EventContext<'a> {
    pub event: &'a Event,
    pub github: &'a dyn GitHubApi,
    pub settings: &'a BotSettings,
}

impl<'a> EventContext<'a> {
    pub fn new(event: &'a Event, github: &'a dyn GitHubApi, settings: &'a BotSettings) -> Self {
        Self {
            event,
            github,
            settings,
        }
    }

    /// Shortcut for [`Event::repository`].
    pub fn repo(&self) -> StewardResult<RepoRef> {
        self.event.repository()
    }
}
