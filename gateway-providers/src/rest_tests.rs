//! RestProvider integration tests against a stubbed HTTP endpoint.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use gateway_core::{GatewayAdapter, SiteUrls};
    use gateway_types::{
        Address, Currency, GatewayError, LineItem, Operation, Order, OrderId, OrderStore,
        PaymentForm, RequestData, StoreError, Transaction, TransactionKind, TransportError,
    };

    use crate::rest::{RestProvider, RestSettings};

    struct InMemoryOrders {
        orders: Mutex<HashMap<OrderId, Order>>,
    }

    impl InMemoryOrders {
        fn with(order: &Order) -> Arc<Self> {
            let mut orders = HashMap::new();
            orders.insert(order.id, order.clone());
            Arc::new(Self {
                orders: Mutex::new(orders),
            })
        }
    }

    #[async_trait]
    impl OrderStore for InMemoryOrders {
        async fn get_order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
            Ok(self.orders.lock().unwrap().get(&id).cloned())
        }
    }

    fn sample_order() -> Order {
        Order::new("1001", Currency::USD, dec!(19.99))
            .with_email("buyer@example.com")
            .with_line_items(vec![
                LineItem::new(1, 1, dec!(19.99)).with_description("Blue T-Shirt"),
            ])
            .with_billing_address(Address {
                first_name: Some("Ada".into()),
                last_name: Some("Lovelace".into()),
                ..Address::default()
            })
    }

    fn card_form() -> PaymentForm {
        PaymentForm {
            number: Some("4242424242424242".into()),
            expiry_month: Some(12),
            expiry_year: Some(2030),
            cvv: Some("123".into()),
            client_ip: Some("::1".into()),
            ..PaymentForm::default()
        }
    }

    fn adapter(server: &MockServer, order: &Order) -> GatewayAdapter<RestProvider> {
        let provider = RestProvider::new(RestSettings::new(server.uri(), "sk_test"));
        GatewayAdapter::new(
            provider,
            InMemoryOrders::with(order),
            Arc::new(SiteUrls::new("https://shop.test").unwrap()),
        )
    }

    fn approved_body(reference: &str) -> serde_json::Value {
        serde_json::json!({
            "approved": true,
            "message": "Approved",
            "id": reference,
        })
    }

    async fn wire_body(server: &MockServer) -> serde_json::Value {
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        serde_json::from_slice(&requests[0].body).unwrap()
    }

    #[tokio::test]
    async fn test_purchase_posts_generic_payload_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .and(header("authorization", "Bearer sk_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(approved_body("ch_100")))
            .expect(1)
            .mount(&server)
            .await;

        let order = sample_order();
        let adapter = adapter(&server, &order);
        let tx = Transaction::new(order.id, TransactionKind::Purchase, dec!(19.99), Currency::USD);

        let response = adapter.purchase(&tx, &card_form()).await.unwrap();

        assert!(response.is_successful());
        assert_eq!(response.reference(), Some("ch_100"));

        let body = wire_body(&server).await;
        assert_eq!(body["amount"], "19.99");
        assert_eq!(body["currency"], "USD");
        assert_eq!(body["order"], "1001");
        assert_eq!(body["receiptEmail"], "buyer@example.com");
        assert_eq!(body["transactionReference"], tx.hash.as_str());
        assert_eq!(body["clientIp"], "127.0.0.1");
        assert_eq!(body["card"]["number"], "4242424242424242");
        assert_eq!(body["card"]["firstName"], "Ada");
        assert_eq!(body["items"][0]["name"], "Blue T-Shirt");
        assert_eq!(body["items"][0]["quantity"], 1);
    }

    #[tokio::test]
    async fn test_declined_charge_is_a_response_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "approved": false,
                "message": "Insufficient funds",
            })))
            .mount(&server)
            .await;

        let order = sample_order();
        let adapter = adapter(&server, &order);
        let tx = Transaction::new(order.id, TransactionKind::Purchase, dec!(19.99), Currency::USD);

        let response = adapter.purchase(&tx, &card_form()).await.unwrap();

        assert!(!response.is_successful());
        assert_eq!(response.message(), Some("Insufficient funds"));
        assert!(response.reference().is_none());
    }

    #[tokio::test]
    async fn test_http_error_maps_to_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let order = sample_order();
        let adapter = adapter(&server, &order);
        let tx = Transaction::new(order.id, TransactionKind::Purchase, dec!(19.99), Currency::USD);

        let result = adapter.purchase(&tx, &card_form()).await;

        assert!(matches!(
            result,
            Err(GatewayError::Transport(TransportError::Http { status: 502, .. }))
        ));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let order = sample_order();
        let adapter = adapter(&server, &order);
        let tx = Transaction::new(order.id, TransactionKind::Purchase, dec!(19.99), Currency::USD);

        let result = adapter.purchase(&tx, &card_form()).await;

        assert!(matches!(
            result,
            Err(GatewayError::Transport(TransportError::MalformedResponse(_)))
        ));
    }

    #[tokio::test]
    async fn test_capture_targets_the_prior_provider_reference() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/captures"))
            .respond_with(ResponseTemplate::new(200).set_body_json(approved_body("cap_1")))
            .mount(&server)
            .await;

        let order = sample_order();
        let adapter = adapter(&server, &order);
        let tx = Transaction::new(order.id, TransactionKind::Capture, dec!(19.99), Currency::USD)
            .with_reference("ch_100");

        adapter.capture(&tx).await.unwrap();

        let body = wire_body(&server).await;
        assert_eq!(body["transactionReference"], "ch_100");
        assert!(body.get("card").is_none());
        assert!(body.get("items").is_none());
    }

    #[tokio::test]
    async fn test_complete_purchase_is_unsupported_with_zero_traffic() {
        let server = MockServer::start().await;

        let order = sample_order();
        let adapter = adapter(&server, &order);
        let tx = Transaction::new(
            order.id,
            TransactionKind::CompletePurchase,
            dec!(19.99),
            Currency::USD,
        );

        let result = adapter.complete_purchase(&tx).await;

        assert!(matches!(
            result,
            Err(GatewayError::UnsupportedOperation(Operation::CompletePurchase))
        ));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transmit_replacement_reaches_the_wire_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/charges"))
            .respond_with(ResponseTemplate::new(200).set_body_json(approved_body("ch_1")))
            .mount(&server)
            .await;

        let order = sample_order();
        let mut adapter = adapter(&server, &order);
        adapter
            .hooks_mut()
            .on_transmit(|event| event.replace(RequestData::Text("signed-blob".into())));
        let tx = Transaction::new(order.id, TransactionKind::Purchase, dec!(19.99), Currency::USD);

        adapter.purchase(&tx, &card_form()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].body, b"signed-blob");
    }

    #[tokio::test]
    async fn test_create_payment_source_extracts_the_card_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment-sources"))
            .respond_with(ResponseTemplate::new(200).set_body_json(approved_body("src_9")))
            .mount(&server)
            .await;

        let order = sample_order();
        let adapter = adapter(&server, &order);

        let source = adapter
            .create_payment_source(&card_form(), Currency::USD)
            .await
            .unwrap();

        assert_eq!(source.reference, "src_9");
        assert_eq!(source.description, "Card ending in 4242");

        let body = wire_body(&server).await;
        assert_eq!(body["amount"], "0");
        assert_eq!(body["card"]["cvv"], "123");
    }
}
