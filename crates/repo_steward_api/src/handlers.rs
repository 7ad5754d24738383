//! HTTP request handlers
//!
//! `POST /webhook` turns a GitHub delivery into an [`Event`] and hands it to the
//! dispatcher on a background task, so GitHub gets its answer before any
//! plugin runs. `GET /health` reports liveness.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use repo_steward_core::{Event, EventName};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, Instrument};

use crate::{
    errors::ApiError,
    signature::{verify_signature, SIGNATURE_HEADER},
    AppState,
};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// Header naming the event type.
pub const EVENT_HEADER: &str = "x-github-event";

/// Header carrying the unique id of a delivery.
pub const DELIVERY_HEADER: &str = "x-github-delivery";

/// Body returned for an accepted delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookAccepted {
    pub delivery_id: String,
    pub event: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// POST /webhook
///
/// Returns:
/// - `200` for `ping`
/// - `202` once the event is queued for dispatch (also for event types no
///   plugin handles)
/// - `401` if a webhook secret is configured and the signature does not match
/// - `400` if the event header is missing, names the internal `schedule`
///   event, or the body is not JSON
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    if let Some(secret) = &state.webhook_secret {
        let signature = header_str(&headers, SIGNATURE_HEADER);
        verify_signature(secret.expose_secret().as_bytes(), &body, signature)?;
    }

    let name = header_str(&headers, EVENT_HEADER).ok_or(ApiError::MissingHeader(EVENT_HEADER))?;
    let delivery_id = header_str(&headers, DELIVERY_HEADER)
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let payload: serde_json::Value = serde_json::from_slice(&body)?;

    let event = Event::new(EventName::parse(name), delivery_id, payload);
    let accepted = WebhookAccepted {
        delivery_id: event.delivery_id.clone(),
        event: event.name.to_string(),
        action: event.action.clone(),
    };

    match &event.name {
        // Sweep events are synthesized by the scheduler only.
        EventName::Schedule => return Err(ApiError::ReservedEvent(event.name.to_string())),
        EventName::Ping => {
            info!(delivery_id = %event.delivery_id, "Received ping");
            return Ok((StatusCode::OK, Json(accepted)).into_response());
        }
        EventName::Other(name) => {
            debug!(
                event = %name,
                delivery_id = %event.delivery_id,
                "Ignoring event type without plugins"
            );
            return Ok((StatusCode::ACCEPTED, Json(accepted)).into_response());
        }
        _ => {}
    }

    info!(
        event = %event.name,
        action = event.action_str(),
        delivery_id = %event.delivery_id,
        "Accepted webhook delivery"
    );

    let span = tracing::info_span!("delivery", delivery_id = %event.delivery_id);
    tokio::spawn(dispatch_event(state, event).instrument(span));

    Ok((StatusCode::ACCEPTED, Json(accepted)).into_response())
}

/// Runs every plugin registered for the event with a client for its installation.
pub(crate) async fn dispatch_event(state: AppState, event: Event) {
    let github = match state.clients.client_for(&event).await {
        Ok(github) => github,
        Err(e) => {
            error!(
                event = %event.name,
                action = event.action_str(),
                delivery_id = %event.delivery_id,
                error = %e,
                "Failed to create a GitHub client for the event"
            );
            return;
        }
    };

    let report = state.dispatcher.dispatch(&event, github.as_ref()).await;
    debug!(
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "Finished dispatching delivery"
    );
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|h| h.to_str().ok())
}

/// GET /health
///
/// Health check endpoint.
///
/// Returns service health status with version and timestamp.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Current timestamp (ISO 8601)
    pub timestamp: String,
}
