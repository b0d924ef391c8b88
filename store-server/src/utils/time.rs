//! Time helpers

/// Current time as epoch millis (the timestamp unit used across the models).
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
