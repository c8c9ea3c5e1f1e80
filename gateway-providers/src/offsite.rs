//! Form-encoded offsite/redirect provider.
//!
//! Speaks a name-value-pair dialect: every operation is a POST of
//! form fields to one endpoint, distinguished by a `METHOD` field.
//! Replies are form-encoded too, with `ACK` carrying the verdict.
//! Buyers enter card details on the provider's pages, so successful
//! authorize and purchase replies carry a redirect.

use std::collections::BTreeMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use gateway_types::{
    Capabilities, GatewayError, Operation, PaymentForm, PaymentRequest, Provider, ProviderClient,
    ProviderRequest, RawResponse, Redirect, RequestData, TransportError,
};

/// Connection settings for the offsite provider.
#[derive(Debug, Clone)]
pub struct OffsiteSettings {
    /// The single NVP endpoint.
    pub endpoint: String,
    /// Merchant account identifier.
    pub account: String,
}

impl OffsiteSettings {
    pub fn new(endpoint: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            account: account.into(),
        }
    }

    /// Loads settings from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let endpoint = env::var("GATEWAY_OFFSITE_URL")
            .map_err(|_| anyhow::anyhow!("GATEWAY_OFFSITE_URL environment variable is required"))?;
        let account = env::var("GATEWAY_OFFSITE_ACCOUNT").map_err(|_| {
            anyhow::anyhow!("GATEWAY_OFFSITE_ACCOUNT environment variable is required")
        })?;
        Ok(Self { endpoint, account })
    }
}

/// Provider strategy for the offsite dialect.
pub struct OffsiteProvider {
    settings: OffsiteSettings,
}

impl OffsiteProvider {
    pub fn new(settings: OffsiteSettings) -> Self {
        Self { settings }
    }
}

impl Provider for OffsiteProvider {
    fn name(&self) -> &'static str {
        "offsite"
    }

    fn create_client(&self) -> Result<Arc<dyn ProviderClient>, GatewayError> {
        Ok(Arc::new(OffsiteClient::new(&self.settings)?))
    }

    fn populate_request(&self, request: &mut PaymentRequest, _form: Option<&PaymentForm>) {
        // Checkout pages are the provider's; keep them lean.
        request.no_shipping = Some(true);
        request.allow_note = Some(false);
        request.address_override = Some(
            request
                .card
                .as_ref()
                .is_some_and(|card| card.shipping_address.is_some()),
        );
        request.button_source = Some("gateway-rs".to_string());
    }
}

/// Connected client for the offsite dialect.
pub struct OffsiteClient {
    http: reqwest::Client,
    endpoint: String,
    account: String,
}

impl OffsiteClient {
    pub fn new(settings: &OffsiteSettings) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
            account: settings.account.clone(),
        })
    }

    fn method_name(operation: Operation) -> Option<&'static str> {
        match operation {
            Operation::Authorize => Some("AUTHORIZE"),
            Operation::Purchase => Some("SALE"),
            Operation::Capture => Some("CAPTURE"),
            Operation::Refund => Some("REFUND"),
            Operation::CompleteAuthorize => Some("COMPLETE_AUTHORIZE"),
            Operation::CompletePurchase => Some("COMPLETE_PURCHASE"),
            Operation::CreatePaymentSource | Operation::Webhooks | Operation::PartialRefund => {
                None
            }
        }
    }
}

impl ProviderClient for OffsiteClient {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            authorize: true,
            capture: true,
            complete_authorize: true,
            complete_purchase: true,
            purchase: true,
            refund: true,
            create_payment_source: false,
            webhooks: true,
            partial_refund: false,
        }
    }

    fn request(
        &self,
        operation: Operation,
        payload: &PaymentRequest,
    ) -> Result<Box<dyn ProviderRequest>, GatewayError> {
        let method =
            Self::method_name(operation).ok_or(GatewayError::UnsupportedOperation(operation))?;
        Ok(Box::new(OffsiteRequest {
            http: self.http.clone(),
            endpoint: self.endpoint.clone(),
            fields: encode_fields(method, &self.account, payload),
        }))
    }
}

/// One prepared call against the offsite dialect.
pub struct OffsiteRequest {
    http: reqwest::Client,
    endpoint: String,
    fields: Vec<(String, String)>,
}

impl OffsiteRequest {
    async fn post_form(&self, fields: &[(String, String)]) -> Result<RawResponse, TransportError> {
        debug!(endpoint = %self.endpoint, "posting provider request");
        let resp = self
            .http
            .post(&self.endpoint)
            .form(fields)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        parse_reply(resp).await
    }
}

#[async_trait::async_trait]
impl ProviderRequest for OffsiteRequest {
    fn data(&self) -> RequestData {
        RequestData::Form(self.fields.clone())
    }

    async fn send(&self) -> Result<RawResponse, TransportError> {
        self.post_form(&self.fields).await
    }

    async fn send_data(&self, data: RequestData) -> Result<RawResponse, TransportError> {
        match data {
            RequestData::Form(fields) => self.post_form(&fields).await,
            RequestData::Json(body) => {
                let resp = self
                    .http
                    .post(&self.endpoint)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| TransportError::Network(e.to_string()))?;
                parse_reply(resp).await
            }
            RequestData::Text(text) => {
                let resp = self
                    .http
                    .post(&self.endpoint)
                    .body(text)
                    .send()
                    .await
                    .map_err(|e| TransportError::Network(e.to_string()))?;
                parse_reply(resp).await
            }
        }
    }

    fn set_transaction_reference(&mut self, reference: &str) {
        if let Some(pair) = self.fields.iter_mut().find(|(key, _)| key == "TRANSACTIONID") {
            pair.1 = reference.to_string();
        } else {
            self.fields
                .push(("TRANSACTIONID".to_string(), reference.to_string()));
        }
    }
}

/// Flattens the generic payload into NVP fields.
fn encode_fields(method: &str, account: &str, payload: &PaymentRequest) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = Vec::new();
    let mut push = |key: &str, value: String| fields.push((key.to_string(), value));

    push("METHOD", method.to_string());
    push("ACCOUNT", account.to_string());

    let mut amount = payload.currency.round(payload.amount);
    amount.rescale(payload.currency.decimal_places() as u32);
    push("AMT", amount.to_string());
    push("CURRENCYCODE", payload.currency.to_string());

    if let Some(reference) = &payload.transaction_reference {
        push("TRANSACTIONID", reference.clone());
    }
    if let Some(order) = &payload.order {
        push("INVNUM", order.clone());
    }
    if let Some(description) = &payload.description {
        push("DESC", description.clone());
    }
    if let Some(url) = &payload.return_url {
        push("RETURNURL", url.clone());
    }
    if let Some(url) = &payload.cancel_url {
        push("CANCELURL", url.clone());
    }
    if let Some(url) = &payload.notify_url {
        push("NOTIFYURL", url.clone());
    }
    if let Some(email) = &payload.receipt_email {
        push("EMAIL", email.clone());
    }
    if let Some(ip) = &payload.client_ip {
        push("IP", ip.clone());
    }
    if let Some(no_shipping) = payload.no_shipping {
        push("NOSHIPPING", flag(no_shipping));
    }
    if let Some(allow_note) = payload.allow_note {
        push("ALLOWNOTE", flag(allow_note));
    }
    if let Some(address_override) = payload.address_override {
        push("ADDROVERRIDE", flag(address_override));
    }
    if let Some(source) = &payload.button_source {
        push("BUTTONSOURCE", source.clone());
    }
    if let Some(card) = &payload.card {
        if let Some(first_name) = &card.first_name {
            push("FIRSTNAME", first_name.clone());
        }
        if let Some(last_name) = &card.last_name {
            push("LASTNAME", last_name.clone());
        }
    }

    if let Some(items) = &payload.items {
        for (n, entry) in items.entries().iter().enumerate() {
            push(&format!("L_NAME{n}"), entry.name.clone());
            push(&format!("L_DESC{n}"), entry.description.clone());
            push(&format!("L_QTY{n}"), entry.quantity.to_string());
            push(&format!("L_AMT{n}"), entry.price.to_string());
        }
    }

    fields
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

async fn parse_reply(resp: reqwest::Response) -> Result<RawResponse, TransportError> {
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(TransportError::Http {
            status: status.as_u16(),
            body: text,
        });
    }

    let fields: BTreeMap<String, String> = url::form_urlencoded::parse(text.as_bytes())
        .into_owned()
        .collect();
    let ack = fields.get("ACK").ok_or_else(|| {
        TransportError::MalformedResponse("reply is missing the ACK field".to_string())
    })?;

    let success = ack == "Success" || ack == "SuccessWithWarning";
    let message = fields
        .get("LONGMESSAGE0")
        .or_else(|| fields.get("SHORTMESSAGE0"))
        .cloned();
    let reference = fields
        .get("TRANSACTIONID")
        .or_else(|| fields.get("TOKEN"))
        .cloned();
    let redirect = fields.get("REDIRECTURL").map(|url| Redirect::get(url.clone()));
    let payload = serde_json::to_value(&fields)
        .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;

    Ok(RawResponse {
        success,
        message,
        reference,
        redirect,
        payload,
    })
}
