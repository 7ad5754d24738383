//! Helpers shared by the handler and route tests.

use async_trait::async_trait;
use axum::{body::Body, http::Request};
use github_client::GitHubApi;
use repo_steward_core::{BotSettings, Dispatcher, Event};
use secrecy::SecretString;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::{client_provider::ClientSource, signature::sign, AppState};

pub const SECRET: &str = "webhook-secret";

/// Records the events a client was requested for and refuses to build one,
/// so dispatch stops before any plugin runs.
#[derive(Default)]
pub struct RecordingClients {
    requested: Mutex<Vec<(String, Option<String>)>>,
    notify: Notify,
}

impl RecordingClients {
    pub fn requested(&self) -> Vec<(String, Option<String>)> {
        self.requested.lock().unwrap().clone()
    }

    /// Waits until a client was requested at least once.
    pub async fn wait_for_request(&self) {
        tokio::time::timeout(std::time::Duration::from_secs(5), self.notify.notified())
            .await
            .expect("no client was requested");
    }
}

#[async_trait]
impl ClientSource for RecordingClients {
    async fn client_for(&self, event: &Event) -> Result<Arc<dyn GitHubApi>, github_client::Error> {
        self.requested
            .lock()
            .unwrap()
            .push((event.name.to_string(), event.action.clone()));
        self.notify.notify_one();
        Err(github_client::Error::AuthError(
            "clients are not available in tests".to_string(),
        ))
    }
}

pub fn state(secret: Option<&str>) -> (AppState, Arc<RecordingClients>) {
    let clients = Arc::new(RecordingClients::default());
    let state = AppState::new(
        Arc::new(Dispatcher::from_settings(BotSettings::default())),
        clients.clone(),
        secret.map(|s| SecretString::from(s.to_string())),
    );
    (state, clients)
}

/// Builds a webhook delivery signed with [`SECRET`].
pub fn delivery(event: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .header("x-github-event", event)
        .header("x-github-delivery", "72d3162e-cc78-11e3-81ab-4c9367dc0958")
        .header("x-hub-signature-256", sign(SECRET.as_bytes(), body.as_bytes()))
        .body(Body::from(body.to_string()))
        .unwrap()
}
