//! Checkout example demonstrating a full payment flow against a stubbed provider.
//!
//! Run with: cargo run -p gateway-providers --example checkout

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal_macros::dec;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gateway_core::{GatewayAdapter, SiteUrls};
use gateway_providers::{RestProvider, RestSettings};
use gateway_types::{
    Adjustment, AdjustmentKind, Currency, LineItem, Order, OrderId, OrderStore, PaymentForm,
    StoreError, Transaction, TransactionKind,
};

struct InMemoryOrders {
    orders: Mutex<HashMap<OrderId, Order>>,
}

#[async_trait]
impl OrderStore for InMemoryOrders {
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.lock().unwrap().get(&id).cloned())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Stand in for the provider's API
    let provider_api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "approved": true,
            "message": "Approved",
            "id": "ch_100",
        })))
        .mount(&provider_api)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/refunds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "approved": true,
            "message": "Refunded",
            "id": "re_100",
        })))
        .mount(&provider_api)
        .await;

    println!("🚀 Provider stub listening at {}", provider_api.uri());

    // The order being paid
    let order = Order::new("1001", Currency::USD, dec!(24.94))
        .with_email("buyer@example.com")
        .with_line_items(vec![
            LineItem::new(1, 1, dec!(19.99)).with_description("Blue T-Shirt"),
        ])
        .with_adjustments(vec![
            Adjustment::new(AdjustmentKind::Shipping, dec!(4.95)).with_name("Standard post"),
        ]);
    let store = Arc::new(InMemoryOrders {
        orders: Mutex::new(HashMap::from([(order.id, order.clone())])),
    });

    // Wire the adapter
    let provider = RestProvider::new(RestSettings::new(provider_api.uri(), "sk_test"));
    let urls = Arc::new(SiteUrls::new("https://shop.example")?);
    let mut adapter = GatewayAdapter::new(provider, store, urls);
    adapter.hooks_mut().on_before_send(|event| {
        println!(
            "🔍 about to send {} for transaction {}",
            event.kind, event.transaction.hash
        );
    });

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: purchase, then refund
    // ─────────────────────────────────────────────────────────────────────────

    let form = PaymentForm {
        first_name: Some("Ada".into()),
        last_name: Some("Lovelace".into()),
        number: Some("4242424242424242".into()),
        expiry_month: Some(12),
        expiry_year: Some(2030),
        cvv: Some("123".into()),
        client_ip: Some("::1".into()),
        ..PaymentForm::default()
    };

    let purchase = Transaction::new(order.id, TransactionKind::Purchase, dec!(24.94), Currency::USD);
    let response = adapter.purchase(&purchase, &form).await?;
    println!(
        "💳 purchase: success={} reference={:?} message={:?}",
        response.is_successful(),
        response.reference(),
        response.message()
    );

    let refund = purchase
        .child(TransactionKind::Refund)
        .with_reference(response.reference().unwrap_or_default());
    let response = adapter.refund(&refund).await?;
    println!(
        "↩️  refund: success={} reference={:?}",
        response.is_successful(),
        response.reference()
    );

    println!("✅ Done");
    Ok(())
}
