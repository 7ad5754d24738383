//! Settings shared by every plugin.
//!
//! The API binary reads these from the `[bot]` table of its configuration file.
//! Every field has a default so an empty table is valid.

use serde::{Deserialize, Serialize};

use crate::conventions::CommitConvention;

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;

/// Settings handed to plugins through the event context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    /// Login of the account the bot posts as. Comments by this account are
    /// the only ones the duplicate pruner and issue linker consider their own.
    pub bot_login: String,

    /// Plugins to register. `None` registers every plugin.
    pub enabled_plugins: Option<Vec<String>>,

    pub commit_message: CommitMessageSettings,

    pub tsc_meeting: TscMeetingSettings,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            bot_login: "repo-steward[bot]".to_string(),
            enabled_plugins: None,
            commit_message: CommitMessageSettings::default(),
            tsc_meeting: TscMeetingSettings::default(),
        }
    }
}

impl BotSettings {
    /// Returns true if the named plugin should be registered.
    pub fn is_plugin_enabled(&self, name: &str) -> bool {
        match &self.enabled_plugins {
            Some(enabled) => enabled.iter().any(|p| p == name),
            None => true,
        }
    }
}

/// Settings of the commit-message checker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitMessageSettings {
    pub convention: CommitConvention,

    /// Repositories (`owner/name`) the checker leaves alone.
    pub excluded_repositories: Vec<String>,

    /// Linked from the status when a message is rejected.
    pub guidelines_url: Option<String>,
}

impl CommitMessageSettings {
    pub fn is_excluded(&self, full_name: &str) -> bool {
        self.excluded_repositories
            .iter()
            .any(|r| r.eq_ignore_ascii_case(full_name))
    }
}

/// Settings of the recurring TSC meeting issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TscMeetingSettings {
    /// Team invited to the meeting, as `org/team-slug`.
    pub team: String,

    /// Meeting start in UTC, `HH:MM`.
    pub time_utc: String,

    /// IANA time zone names the meeting time is listed in.
    pub time_zones: Vec<String>,

    /// Where the meeting takes place.
    pub location: String,
}

impl Default for TscMeetingSettings {
    fn default() -> Self {
        Self {
            team: String::new(),
            time_utc: "21:00".to_string(),
            time_zones: vec![
                "America/Los_Angeles".to_string(),
                "America/New_York".to_string(),
                "Europe/London".to_string(),
                "Europe/Berlin".to_string(),
                "Asia/Kolkata".to_string(),
                "Asia/Tokyo".to_string(),
            ],
            location: "the project chat room".to_string(),
        }
    }
}

impl TscMeetingSettings {
    /// Splits [`Self::team`] into organization and team slug.
    pub fn team_parts(&self) -> Option<(&str, &str)> {
        self.team
            .split_once('/')
            .filter(|(org, slug)| !org.is_empty() && !slug.is_empty())
    }
}
