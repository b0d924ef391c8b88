//! Application state

use std::sync::Arc;
use std::time::Duration;

use crate::core::Config;
use crate::gateway::{PaymentGateway, StripeGateway};
use crate::orders::OrderLedger;
use crate::store::{
    CartStore, CouponCatalog, ProcessedEventStore, ProductCatalog, ReconciliationFailureStore,
};

/// Shared application state
///
/// Checkout (client-initiated) and reconciliation (event-initiated) run
/// concurrently against these handles; every store serializes per entry,
/// so there is no global lock here.
#[derive(Clone)]
pub struct AppState {
    /// Product catalog (read model + authoritative stock)
    pub products: Arc<ProductCatalog>,
    /// Per-user carts
    pub carts: Arc<CartStore>,
    /// Coupon catalog
    pub coupons: Arc<CouponCatalog>,
    /// Order ledger (state machine + transition log)
    pub ledger: Arc<OrderLedger>,
    /// Processed webhook event ids (dedup fast path)
    pub processed_events: Arc<ProcessedEventStore>,
    /// Reconciliation failure records (operator visibility)
    pub failures: Arc<ReconciliationFailureStore>,
    /// Payment session gateway
    pub gateway: Arc<dyn PaymentGateway>,
    /// Webhook signing secret
    pub webhook_secret: String,
    /// Whether cash checkout implies immediate placement
    pub cash_auto_place: bool,
}

impl AppState {
    /// Create state with the real gateway from configuration.
    pub fn new(config: &Config) -> Self {
        let gateway = Arc::new(StripeGateway::new(
            config.gateway_secret_key.clone(),
            config.currency.clone(),
            config.checkout_success_url.clone(),
            config.checkout_cancel_url.clone(),
            Duration::from_secs(config.gateway_timeout_secs),
        ));
        Self::with_gateway(config, gateway)
    }

    /// Create state with an injected gateway (tests, local tooling).
    pub fn with_gateway(config: &Config, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            products: Arc::new(ProductCatalog::new()),
            carts: Arc::new(CartStore::new()),
            coupons: Arc::new(CouponCatalog::new()),
            ledger: Arc::new(OrderLedger::new()),
            processed_events: Arc::new(ProcessedEventStore::new()),
            failures: Arc::new(ReconciliationFailureStore::new()),
            gateway,
            webhook_secret: config.webhook_secret.clone(),
            cash_auto_place: config.cash_auto_place,
        }
    }
}
