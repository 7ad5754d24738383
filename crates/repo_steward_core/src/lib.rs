//! # Repo Steward Core
//!
//! Event model, dispatcher and plugins of the repository steward bot.
//!
//! ## Overview
//!
//! The steward reacts to GitHub webhook events and to periodic repository
//! sweeps. Every event is routed by the [`Dispatcher`] to the plugins
//! registered for its name and action. Each [`Plugin`] recomputes its decision
//! from the event payload and the current state on GitHub, then performs a
//! few API calls through [`github_client::GitHubApi`]. Nothing is stored
//! between events.
//!
//! ## Examples
//!
//! ```no_run
//! use repo_steward_core::{BotSettings, Dispatcher, Event, EventName};
//!
//! # async fn example(github: github_client::GitHubClient, payload: serde_json::Value) {
//! let dispatcher = Dispatcher::from_settings(BotSettings::default());
//!
//! let event = Event::new(EventName::Issues, "72d3162e-cc78-11e3-81ab-4c9367dc0958", payload);
//! let report = dispatcher.dispatch(&event, &github).await;
//! println!("{} plugins handled the event", report.handled());
//! # }
//! ```

pub mod comment_tag;
pub mod context;
pub mod conventions;
pub mod dispatcher;
mod errors;
pub mod event;
pub mod plugin;
pub mod plugins;
pub mod scheduler;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use context::EventContext;
pub use dispatcher::{DispatchReport, Dispatcher};
pub use errors::{StewardError, StewardResult};
pub use event::{
    Event, EventName, IssueCommentEvent, IssuesEvent, PullRequestEvent, PullRequestReviewEvent,
    RepositorySweep, StatusEvent,
};
pub use plugin::{EventPattern, Plugin, Registration};
pub use scheduler::{RepositorySource, Scheduler, SweepReport, SweepTarget};
pub use settings::{BotSettings, CommitMessageSettings, TscMeetingSettings};
