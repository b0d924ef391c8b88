//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// ISO 4217 currency code used for gateway sessions
    pub currency: String,
    /// Payment gateway secret key
    pub gateway_secret_key: String,
    /// Webhook signing secret
    pub webhook_secret: String,
    /// URL to redirect after a successful checkout session
    pub checkout_success_url: String,
    /// URL to redirect after a cancelled checkout session
    pub checkout_cancel_url: String,
    /// Bounded timeout for gateway session creation (seconds)
    pub gateway_timeout_secs: u64,
    /// Policy knob: whether cash checkout implies immediate placement.
    /// When false, cash orders stay PENDING for an external fulfillment
    /// signal.
    pub cash_auto_place: bool,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in
    /// non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            currency: std::env::var("CURRENCY").unwrap_or_else(|_| "eur".into()),
            gateway_secret_key: Self::require_secret("GATEWAY_SECRET_KEY", &environment)?,
            webhook_secret: Self::require_secret("WEBHOOK_SECRET", &environment)?,
            checkout_success_url: std::env::var("CHECKOUT_SUCCESS_URL")
                .unwrap_or_else(|_| "https://example.com/checkout/success".into()),
            checkout_cancel_url: std::env::var("CHECKOUT_CANCEL_URL")
                .unwrap_or_else(|_| "https://example.com/checkout/cancel".into()),
            gateway_timeout_secs: std::env::var("GATEWAY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            cash_auto_place: std::env::var("CASH_AUTO_PLACE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            environment,
        })
    }

    /// A development config for tests and local tooling.
    pub fn for_tests() -> Self {
        Self {
            http_port: 0,
            environment: "development".into(),
            currency: "eur".into(),
            gateway_secret_key: "sk_test".into(),
            webhook_secret: "whsec_test".into(),
            checkout_success_url: "https://example.com/checkout/success".into(),
            checkout_cancel_url: "https://example.com/checkout/cancel".into(),
            gateway_timeout_secs: 10,
            cash_auto_place: true,
        }
    }
}
