//! Routes events to the plugins registered for them.

use github_client::GitHubApi;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, Instrument};

use crate::{plugins, BotSettings, Event, EventContext, Registration};

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;

/// Outcome of dispatching one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Plugins that handled the event without error
    pub succeeded: Vec<&'static str>,
    /// Plugins whose handler returned an error
    pub failed: Vec<&'static str>,
}

impl DispatchReport {
    pub fn handled(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Runs the matching plugins of an event one after the other.
///
/// A failing plugin is logged and does not stop the remaining ones.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registrations: Vec<Registration>,
    settings: Arc<BotSettings>,
}

impl Dispatcher {
    pub fn new(registrations: Vec<Registration>, settings: Arc<BotSettings>) -> Self {
        Self {
            registrations,
            settings,
        }
    }

    /// Builds a dispatcher with every built-in plugin enabled by the settings.
    pub fn from_settings(settings: BotSettings) -> Self {
        let registrations: Vec<Registration> = plugins::registrations()
            .into_iter()
            .filter(|r| settings.is_plugin_enabled(r.plugin.name()))
            .collect();

        info!(
            plugins = ?registrations.iter().map(|r| r.plugin.name()).collect::<Vec<_>>(),
            "Registered plugins"
        );

        Self::new(registrations, Arc::new(settings))
    }

    pub fn settings(&self) -> &BotSettings {
        &self.settings
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Dispatches an event to every matching plugin, in registration order.
    pub async fn dispatch(&self, event: &Event, github: &dyn GitHubApi) -> DispatchReport {
        let mut report = DispatchReport::default();
        let ctx = EventContext::new(event, github, &self.settings);

        for registration in self.registrations.iter().filter(|r| r.matches(event)) {
            let plugin = registration.plugin.name();
            let span = info_span!(
                "plugin",
                plugin,
                event = %event.name,
                action = event.action_str(),
                delivery_id = %event.delivery_id
            );

            match registration.plugin.handle(&ctx).instrument(span).await {
                Ok(()) => {
                    debug!(plugin, event = %event.name, "Plugin handled event");
                    report.succeeded.push(plugin);
                }
                Err(e) => {
                    error!(
                        plugin,
                        event = %event.name,
                        action = event.action_str(),
                        delivery_id = %event.delivery_id,
                        error = %e,
                        "Plugin failed to handle event"
                    );
                    report.failed.push(plugin);
                }
            }
        }

        if report.handled() == 0 {
            debug!(
                event = %event.name,
                action = event.action_str(),
                "No plugin registered for event"
            );
        }

        report
    }
}
