//! Payment webhook handler
//!
//! POST /api/payments/webhook — gateway completion events (raw body for
//! signature verification)
//!
//! Delivery is at-least-once and may be delayed, duplicated, or hit a
//! freshly restarted instance; everything after signature verification is
//! keyed off durable store state, never the in-memory context of the
//! creating request. Anomalies return 200 so the gateway stops retrying;
//! they are recorded for operators instead.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use crate::core::AppState;
use crate::gateway::signature::verify_webhook_signature;
use crate::services::reconcile::{self, ReconcileOutcome};

/// Handle incoming gateway webhook events
///
/// Must receive the raw body (not parsed JSON) for HMAC verification.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    // 1. Signature header
    let sig_header = match headers
        .get("x-gateway-signature")
        .and_then(|v| v.to_str().ok())
    {
        Some(s) => s,
        None => {
            tracing::warn!("Missing x-gateway-signature header");
            return StatusCode::BAD_REQUEST;
        }
    };

    // 2. Verify signature before anything reaches reconciliation
    let now_secs = chrono::Utc::now().timestamp();
    if let Err(e) = verify_webhook_signature(&body, sig_header, &state.webhook_secret, now_secs) {
        tracing::warn!(error = e, "Webhook signature verification failed");
        return StatusCode::BAD_REQUEST;
    }

    // 3. Parse JSON event
    let event: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(%e, "Failed to parse webhook JSON");
            return StatusCode::BAD_REQUEST;
        }
    };

    let event_type = event["type"].as_str().unwrap_or("");
    let event_id = match event["id"].as_str() {
        Some(id) => id,
        None => {
            tracing::warn!("Webhook event missing id");
            return StatusCode::BAD_REQUEST;
        }
    };
    tracing::info!(event_id = event_id, event_type = event_type, "Received gateway webhook");

    // 4. Dispatch by event type
    match event_type {
        "checkout.session.completed" => handle_checkout_completed(&state, event_id, &event),
        _ => {
            tracing::debug!(event_type = event_type, "Unhandled webhook event type");
            StatusCode::OK
        }
    }
}

/// checkout.session.completed → reconcile the referenced order
fn handle_checkout_completed(
    state: &AppState,
    event_id: &str,
    event: &serde_json::Value,
) -> StatusCode {
    let order_id = match event
        .get("data")
        .and_then(|d| d.get("object"))
        .and_then(|o| o.get("metadata"))
        .and_then(|m| m["order_id"].as_str())
    {
        Some(id) => id,
        None => {
            tracing::warn!(event_id = event_id, "Completion event missing order_id metadata");
            return StatusCode::BAD_REQUEST;
        }
    };

    match reconcile::handle_completion(state, order_id, event_id) {
        ReconcileOutcome::Placed(order) => {
            tracing::info!(
                order_id = %order.order_id,
                event_id = event_id,
                "Order placed via completion event"
            );
            StatusCode::OK
        }
        // Replays are success, not errors
        ReconcileOutcome::Duplicate => StatusCode::OK,
        // Recorded for operators; acknowledged so the gateway stops retrying
        ReconcileOutcome::Anomaly => StatusCode::OK,
    }
}
