//! Repo Steward webhook service
//!
//! This crate is the HTTP side of the steward bot. It receives GitHub webhook
//! deliveries, verifies their signature, and hands them to the
//! [`repo_steward_core::Dispatcher`]. It also owns the service configuration,
//! the GitHub client provider and the periodic sweep scheduler task.
//!
//! Plugin logic lives in `repo_steward_core`; nothing here decides what a
//! plugin does with an event.

pub mod client_provider;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod signature;

#[cfg(test)]
mod test_support;

use repo_steward_core::Dispatcher;
use secrecy::SecretString;
use std::sync::Arc;

pub use client_provider::{ClientProvider, ClientSource};
pub use config::{AppConfig, ConfigError, Credentials, ServerConfig, SweepConfig};
pub use errors::{ApiError, ErrorResponse};
pub use server::ApiServer;

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,

    /// Provides the GitHub client each event is dispatched with
    pub clients: Arc<dyn ClientSource>,

    /// Deliveries are only verified when a secret is configured
    pub webhook_secret: Option<Arc<SecretString>>,
}

impl AppState {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        clients: Arc<dyn ClientSource>,
        webhook_secret: Option<SecretString>,
    ) -> Self {
        Self {
            dispatcher,
            clients,
            webhook_secret: webhook_secret.map(Arc::new),
        }
    }
}
