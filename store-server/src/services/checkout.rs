//! Checkout
//!
//! Converts the caller's cart into an immutable priced order:
//! coupon resolution -> cart resolution -> product lookup -> stock
//! pre-check -> pricing -> PENDING order -> gateway session (card) or
//! placement policy (cash).
//!
//! Validation fails fast before any mutation: no partial order, no stock
//! change, cart untouched. A gateway failure after creation leaves the
//! order PENDING and is surfaced to the caller, who may retry.

use shared::models::{Coupon, CouponError, Product};
use shared::order::{CouponSnapshot, Order, PaymentMethod, ShippingAddress};

use crate::core::AppState;
use crate::orders::OrderDraft;
use crate::pricing;
use crate::services::reconcile;
use crate::stock;
use crate::utils::{AppError, AppResult, now_millis};

/// Checkout input
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub payment_method: PaymentMethod,
    pub coupon_code: Option<String>,
    pub phone: String,
    pub street: String,
}

/// Checkout result: the order plus, for card payments, the redirect target
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub order: Order,
    pub redirect_url: Option<String>,
}

fn resolve_coupon(state: &AppState, user_id: &str, code: &str) -> AppResult<Coupon> {
    let coupon = state
        .coupons
        .get_by_code(code)
        .ok_or_else(|| AppError::not_found(format!("Coupon {} not found", code)))?;

    coupon
        .check_redeemable(user_id, now_millis())
        .map_err(|e| match e {
            CouponError::Expired => {
                AppError::validation(format!("Coupon {} is not valid at this time", code))
            }
            CouponError::NotAssigned => {
                AppError::validation(format!("Coupon {} is assigned to another user", code))
            }
            other => AppError::validation(other.to_string()),
        })?;

    Ok(coupon)
}

fn resolve_cart_items(state: &AppState, user_id: &str) -> AppResult<Vec<(Product, i64)>> {
    let cart = state.carts.get(user_id);
    if cart.is_empty() {
        return Err(AppError::validation("Cart is empty"));
    }

    let mut items = Vec::with_capacity(cart.lines.len());
    for line in &cart.lines {
        let product = state.products.get(&line.product_id).ok_or_else(|| {
            AppError::not_found(format!("Product {} not found", line.product_id))
        })?;
        if !product.is_active {
            return Err(AppError::validation(format!(
                "Product {} is no longer available",
                product.name
            )));
        }
        items.push((product, line.quantity));
    }
    Ok(items)
}

/// Create an order from the caller's cart.
pub async fn create_order(
    state: &AppState,
    user_id: &str,
    req: CheckoutRequest,
) -> AppResult<CheckoutOutcome> {
    // Coupon first: an unknown code fails before anything else is read
    let coupon = match &req.coupon_code {
        Some(code) => Some(resolve_coupon(state, user_id, code)?),
        None => None,
    };

    let items = resolve_cart_items(state, user_id)?;

    // Advisory availability check; aborts with nothing created
    stock::precheck(&items).map_err(|e| AppError::business_rule(e.to_string()))?;

    let priced = pricing::price_order(&items, coupon.as_ref())
        .map_err(|e| AppError::validation(e.to_string()))?;

    // Snapshot the coupon terms; the order never dereferences the catalog
    // coupon again
    let coupon_snapshot = coupon.map(|c| CouponSnapshot {
        coupon_id: c.id,
        code: c.code,
        kind: c.kind,
        value: c.value,
    });

    let order = state.ledger.create_order(OrderDraft {
        user_id: user_id.to_string(),
        lines: priced.lines,
        coupon: coupon_snapshot,
        order_price: priced.order_price,
        final_price: priced.final_price,
        payment_method: req.payment_method,
        address: ShippingAddress {
            phone: req.phone,
            street: req.street,
        },
    });

    match req.payment_method {
        PaymentMethod::Card => {
            // Session failure leaves the order PENDING; creation may be
            // retried, pending orders that never pay are acceptable litter
            let session = state
                .gateway
                .create_session(&order)
                .await
                .map_err(|e| AppError::Gateway(e.to_string()))?;

            let order = state
                .ledger
                .attach_session(&order.order_id, &session.session_id)
                .map_err(|e| AppError::internal(e.to_string()))?;

            Ok(CheckoutOutcome {
                order,
                redirect_url: Some(session.redirect_url),
            })
        }
        PaymentMethod::Cash => {
            if state.cash_auto_place {
                // Policy: cash settles immediately; run the same
                // finalization the reconciliation handler uses
                let order = match state.ledger.mark_placed(&order.order_id, None) {
                    Ok(crate::orders::Placement::Transitioned(o)) => {
                        reconcile::finalize_placed(state, &o, "cash-checkout");
                        o
                    }
                    Ok(crate::orders::Placement::AlreadyPlaced(o)) => o,
                    Err(e) => return Err(AppError::internal(e.to_string())),
                };
                Ok(CheckoutOutcome {
                    order,
                    redirect_url: None,
                })
            } else {
                Ok(CheckoutOutcome {
                    order,
                    redirect_url: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::gateway::{CheckoutSession, GatewayError, PaymentGateway};
    use async_trait::async_trait;
    use shared::models::DiscountKind;
    use shared::order::OrderStatus;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Gateway double: succeeds or fails on demand, counts calls
    struct FakeGateway {
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeGateway {
        fn ok() -> Self {
            Self {
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn create_session(&self, order: &Order) -> Result<CheckoutSession, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GatewayError::Request("connect timeout".to_string()));
            }
            Ok(CheckoutSession {
                session_id: format!("cs_{}", order.order_id),
                redirect_url: format!("https://pay.example.com/{}", order.order_id),
            })
        }
    }

    fn state_with(gateway: FakeGateway) -> AppState {
        let state = AppState::with_gateway(&Config::for_tests(), Arc::new(gateway));
        state.products.upsert(Product {
            id: "p1".to_string(),
            name: "Widget".to_string(),
            price: 100.0,
            discount_percent: 10.0,
            stock: 5,
            is_active: true,
        });
        state
    }

    fn request(method: PaymentMethod, coupon_code: Option<&str>) -> CheckoutRequest {
        CheckoutRequest {
            payment_method: method,
            coupon_code: coupon_code.map(String::from),
            phone: "123456".to_string(),
            street: "1 Main St".to_string(),
        }
    }

    #[tokio::test]
    async fn test_card_checkout_creates_pending_order_with_redirect() {
        let state = state_with(FakeGateway::ok());
        state.carts.upsert_line("u1", "p1", 2, 0);

        let outcome = create_order(&state, "u1", request(PaymentMethod::Card, None))
            .await
            .unwrap();

        assert_eq!(outcome.order.status, OrderStatus::Pending);
        assert_eq!(outcome.order.order_price, 180.0);
        assert_eq!(outcome.order.final_price, 180.0);
        assert!(outcome.redirect_url.is_some());
        assert!(outcome.order.session_id.is_some());
        // Cart intact until the completion event arrives
        assert!(!state.carts.get("u1").is_empty());
        // Stock untouched by the advisory pre-check
        assert_eq!(state.products.get("p1").unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let state = state_with(FakeGateway::ok());
        let err = create_order(&state, "u1", request(PaymentMethod::Card, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_coupon_rejected_before_order_creation() {
        let state = state_with(FakeGateway::ok());
        state.carts.upsert_line("u1", "p1", 2, 0);

        let err = create_order(&state, "u1", request(PaymentMethod::Card, Some("GHOST")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(state.ledger.list_for_user("u1").is_empty());
    }

    #[tokio::test]
    async fn test_expired_coupon_rejected() {
        let state = state_with(FakeGateway::ok());
        state.carts.upsert_line("u1", "p1", 2, 0);
        state
            .coupons
            .insert(Coupon {
                id: "c1".to_string(),
                code: "OLD".to_string(),
                kind: DiscountKind::Percentage,
                value: 20.0,
                valid_from: 0,
                valid_to: 1, // long past
                assigned_to: None,
            })
            .unwrap();

        let err = create_order(&state, "u1", request(PaymentMethod::Card, Some("OLD")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_coupon_assigned_to_other_user_rejected() {
        let state = state_with(FakeGateway::ok());
        state.carts.upsert_line("u1", "p1", 2, 0);
        state
            .coupons
            .insert(Coupon {
                id: "c1".to_string(),
                code: "VIP".to_string(),
                kind: DiscountKind::FixedAmount,
                value: 50.0,
                valid_from: 0,
                valid_to: i64::MAX,
                assigned_to: Some("u2".to_string()),
            })
            .unwrap();

        let err = create_order(&state, "u1", request(PaymentMethod::Card, Some("VIP")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_coupon_snapshot_frozen_into_order() {
        let state = state_with(FakeGateway::ok());
        state.carts.upsert_line("u1", "p1", 2, 0);
        state
            .coupons
            .insert(Coupon {
                id: "c1".to_string(),
                code: "SAVE50".to_string(),
                kind: DiscountKind::FixedAmount,
                value: 50.0,
                valid_from: 0,
                valid_to: i64::MAX,
                assigned_to: None,
            })
            .unwrap();

        let outcome = create_order(&state, "u1", request(PaymentMethod::Card, Some("SAVE50")))
            .await
            .unwrap();
        assert_eq!(outcome.order.final_price, 130.0);

        // Editing the catalog coupon later leaves the order untouched
        state
            .coupons
            .update(Coupon {
                id: "c1".to_string(),
                code: "SAVE50".to_string(),
                kind: DiscountKind::FixedAmount,
                value: 5.0,
                valid_from: 0,
                valid_to: i64::MAX,
                assigned_to: None,
            })
            .unwrap();

        let stored = state.ledger.get(&outcome.order.order_id).unwrap();
        assert_eq!(stored.coupon.as_ref().unwrap().value, 50.0);
        assert_eq!(stored.final_price, 130.0);
    }

    #[tokio::test]
    async fn test_out_of_stock_creates_nothing() {
        let state = state_with(FakeGateway::ok());
        // stock = 5, request 6
        state.carts.upsert_line("u1", "p1", 6, 0);

        let err = create_order(&state, "u1", request(PaymentMethod::Card, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
        assert!(state.ledger.list_for_user("u1").is_empty());
        assert_eq!(state.products.get("p1").unwrap().stock, 5);
        assert!(!state.carts.get("u1").is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_leaves_order_pending() {
        let state = state_with(FakeGateway::failing());
        state.carts.upsert_line("u1", "p1", 2, 0);

        let err = create_order(&state, "u1", request(PaymentMethod::Card, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Gateway(_)));

        // The order exists and stays PENDING; cart and stock untouched
        let orders = state.ledger.list_for_user("u1");
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status, OrderStatus::Pending);
        assert!(!state.carts.get("u1").is_empty());
        assert_eq!(state.products.get("p1").unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_cash_auto_place_finalizes_immediately() {
        let state = state_with(FakeGateway::ok());
        state.carts.upsert_line("u1", "p1", 2, 0);

        let outcome = create_order(&state, "u1", request(PaymentMethod::Cash, None))
            .await
            .unwrap();

        assert_eq!(outcome.order.status, OrderStatus::Placed);
        assert!(outcome.redirect_url.is_none());
        assert!(state.carts.get("u1").is_empty());
        assert_eq!(state.products.get("p1").unwrap().stock, 3);
    }

    #[tokio::test]
    async fn test_cash_without_auto_place_stays_pending() {
        let mut config = Config::for_tests();
        config.cash_auto_place = false;
        let state = AppState::with_gateway(&config, Arc::new(FakeGateway::ok()));
        state.products.upsert(Product {
            id: "p1".to_string(),
            name: "Widget".to_string(),
            price: 100.0,
            discount_percent: 10.0,
            stock: 5,
            is_active: true,
        });
        state.carts.upsert_line("u1", "p1", 2, 0);

        let outcome = create_order(&state, "u1", request(PaymentMethod::Cash, None))
            .await
            .unwrap();

        assert_eq!(outcome.order.status, OrderStatus::Pending);
        assert!(!state.carts.get("u1").is_empty());
        assert_eq!(state.products.get("p1").unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_inactive_product_rejected() {
        let state = state_with(FakeGateway::ok());
        state.products.upsert(Product {
            id: "p2".to_string(),
            name: "Retired".to_string(),
            price: 10.0,
            discount_percent: 0.0,
            stock: 5,
            is_active: false,
        });
        state.carts.upsert_line("u1", "p2", 1, 0);

        let err = create_order(&state, "u1", request(PaymentMethod::Card, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
