//! The plugin trait and event patterns plugins register against.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{Event, EventContext, EventName, StewardResult};

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;

/// A webhook event handler.
///
/// Plugins hold no per-event state. Everything a decision depends on is read
/// from the event payload or the GitHub API when `handle` runs. Unmet
/// preconditions return `Ok(())`.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Short kebab-case name used in settings and logs.
    fn name(&self) -> &'static str;

    async fn handle(&self, ctx: &EventContext<'_>) -> StewardResult<()>;
}

/// Matches an event by name and, optionally, action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventPattern {
    pub name: EventName,
    /// `None` matches every action
    pub action: Option<&'static str>,
}

impl EventPattern {
    /// Matches `name.action`.
    pub fn new(name: EventName, action: &'static str) -> Self {
        Self {
            name,
            action: Some(action),
        }
    }

    /// Matches every action of `name`.
    pub fn any(name: EventName) -> Self {
        Self { name, action: None }
    }

    /// One pattern per action of the same event.
    pub fn actions(name: EventName, actions: &[&'static str]) -> Vec<Self> {
        actions
            .iter()
            .map(|action| Self::new(name.clone(), action))
            .collect()
    }

    pub fn matches(&self, event: &Event) -> bool {
        if self.name != event.name {
            return false;
        }

        match self.action {
            Some(action) => event.action.as_deref() == Some(action),
            None => true,
        }
    }
}

/// A plugin together with the events it handles.
#[derive(Clone)]
pub struct Registration {
    pub patterns: Vec<EventPattern>,
    pub plugin: Arc<dyn Plugin>,
}

impl Registration {
    pub fn new(patterns: Vec<EventPattern>, plugin: Arc<dyn Plugin>) -> Self {
        Self { patterns, plugin }
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.patterns.iter().any(|p| p.matches(event))
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("plugin", &self.plugin.name())
            .field("patterns", &self.patterns)
            .finish()
    }
}
