//! Webhook signature verification (HMAC-SHA256)
//!
//! Events arrive signed as `t=<unix-seconds>,v1=<hex hmac>` over
//! `"{timestamp}.{body}"`. Verification uses a constant-time comparison and
//! rejects events outside a 5-minute replay window. Unsigned or invalid
//! events never reach the reconciliation handler.

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Replay window in seconds
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Verify a webhook signature header against the raw request body.
pub fn verify_webhook_signature(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
    now_secs: i64,
) -> Result<(), &'static str> {
    let mut timestamp = "";
    let mut signature = "";
    for part in sig_header.split(',') {
        if let Some(t) = part.strip_prefix("t=") {
            timestamp = t;
        } else if let Some(v) = part.strip_prefix("v1=") {
            signature = v;
        }
    }

    if timestamp.is_empty() || signature.is_empty() {
        return Err("Invalid signature header");
    }

    let signed_payload = format!("{timestamp}.{}", std::str::from_utf8(payload).unwrap_or(""));
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| "HMAC key error")?;
    mac.update(signed_payload.as_bytes());

    // Decode hex signature and use constant-time comparison via verify_slice
    let sig_bytes = hex::decode(signature).map_err(|_| "Invalid signature hex")?;
    mac.verify_slice(&sig_bytes)
        .map_err(|_| "Webhook signature mismatch")?;

    // Reject events outside the replay window
    let ts: i64 = timestamp.parse().map_err(|_| "Invalid timestamp")?;
    if (now_secs - ts).abs() > MAX_EVENT_AGE_SECS {
        return Err("Webhook timestamp too old");
    }

    Ok(())
}

/// Sign a payload the way the gateway does. Used by tests and local tools.
pub fn sign_payload(payload: &[u8], secret: &str, timestamp_secs: i64) -> String {
    let signed_payload = format!(
        "{timestamp_secs}.{}",
        std::str::from_utf8(payload).unwrap_or("")
    );
    // HMAC accepts keys of any length; this cannot fail for SHA-256
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(signed_payload.as_bytes());
    let sig = hex::encode(mac.finalize().into_bytes());
    format!("t={timestamp_secs},v1={sig}")
}
