//! Stripe integration via REST API (no SDK dependency)
//!
//! Creates Checkout Sessions in payment mode with the order's frozen line
//! items and the order id as opaque metadata. Requests carry a bounded
//! timeout; a timeout means "session not confirmed" and the caller leaves
//! the order PENDING.

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use shared::order::Order;

use super::{CheckoutSession, GatewayError, PaymentGateway};
use crate::pricing::money::to_decimal;

const SESSIONS_URL: &str = "https://api.stripe.com/v1/checkout/sessions";

pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    currency: String,
    success_url: String,
    cancel_url: String,
}

impl StripeGateway {
    pub fn new(
        secret_key: impl Into<String>,
        currency: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            secret_key: secret_key.into(),
            currency: currency.into(),
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
        }
    }

    /// Session creation form: line items from the order's frozen snapshot,
    /// unit amounts in minor currency units.
    fn session_form(&self, order: &Order) -> Vec<(String, String)> {
        let mut form = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), self.success_url.clone()),
            ("cancel_url".to_string(), self.cancel_url.clone()),
            (
                "payment_method_types[0]".to_string(),
                "card".to_string(),
            ),
            (
                "metadata[order_id]".to_string(),
                order.order_id.clone(),
            ),
        ];

        for (i, line) in order.lines.iter().enumerate() {
            form.push((
                format!("line_items[{i}][price_data][currency]"),
                self.currency.clone(),
            ));
            form.push((
                format!("line_items[{i}][price_data][product_data][name]"),
                line.name.clone(),
            ));
            form.push((
                format!("line_items[{i}][price_data][unit_amount]"),
                minor_units(line.final_unit_price).to_string(),
            ));
            form.push((format!("line_items[{i}][quantity]"), line.quantity.to_string()));
        }

        form
    }
}

/// Convert a 2dp major-unit amount to integer minor units (cents).
fn minor_units(amount: f64) -> i64 {
    (to_decimal(amount) * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .unwrap_or(0)
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_session(&self, order: &Order) -> Result<CheckoutSession, GatewayError> {
        let resp: serde_json::Value = self
            .client
            .post(SESSIONS_URL)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&self.session_form(order))
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let session_id = resp["id"]
            .as_str()
            .ok_or(GatewayError::MalformedResponse("id"))?
            .to_string();
        let redirect_url = resp["url"]
            .as_str()
            .ok_or(GatewayError::MalformedResponse("url"))?
            .to_string();

        tracing::info!(
            order_id = %order.order_id,
            session_id = %session_id,
            "Checkout session created"
        );

        Ok(CheckoutSession {
            session_id,
            redirect_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderLine, OrderStatus, PaymentMethod, ShippingAddress};

    fn order() -> Order {
        Order {
            order_id: "order-1".to_string(),
            user_id: "u1".to_string(),
            lines: vec![OrderLine {
                product_id: "p1".to_string(),
                name: "Widget".to_string(),
                unit_price: 100.0,
                discount_percent: 10.0,
                final_unit_price: 90.0,
                quantity: 2,
            }],
            coupon: None,
            order_price: 180.0,
            final_price: 180.0,
            payment_method: PaymentMethod::Card,
            status: OrderStatus::Pending,
            address: ShippingAddress {
                phone: "123456".to_string(),
                street: "1 Main St".to_string(),
            },
            session_id: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(minor_units(90.0), 9000);
        assert_eq!(minor_units(0.01), 1);
        assert_eq!(minor_units(10.99), 1099);
        assert_eq!(minor_units(0.0), 0);
    }

    #[test]
    fn test_session_form_carries_order_metadata_and_lines() {
        let gateway = StripeGateway::new(
            "sk_test",
            "eur",
            "https://example.com/success",
            "https://example.com/cancel",
            Duration::from_secs(10),
        );
        let form = gateway.session_form(&order());

        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("metadata[order_id]"), Some("order-1"));
        assert_eq!(
            get("line_items[0][price_data][unit_amount]"),
            Some("9000")
        );
        assert_eq!(get("line_items[0][quantity]"), Some("2"));
        assert_eq!(
            get("line_items[0][price_data][product_data][name]"),
            Some("Widget")
        );
    }
}
