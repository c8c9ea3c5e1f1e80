//! JSON-over-HTTP direct-card provider.
//!
//! Speaks a plain REST dialect: one POST endpoint per operation, the
//! generic payload serialized as the JSON body, bearer-token auth.
//! Declines come back as 2xx replies with `approved: false`; only
//! HTTP-level failures become transport errors.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use gateway_types::{
    Capabilities, GatewayError, Operation, PaymentRequest, Provider, ProviderClient,
    ProviderRequest, RawResponse, Redirect, RequestData, TransportError,
};

/// Connection settings for the REST provider.
#[derive(Debug, Clone)]
pub struct RestSettings {
    pub base_url: String,
    pub api_key: String,
}

impl RestSettings {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Loads settings from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = env::var("GATEWAY_REST_URL")
            .map_err(|_| anyhow::anyhow!("GATEWAY_REST_URL environment variable is required"))?;
        let api_key = env::var("GATEWAY_REST_API_KEY").map_err(|_| {
            anyhow::anyhow!("GATEWAY_REST_API_KEY environment variable is required")
        })?;
        Ok(Self { base_url, api_key })
    }
}

/// Provider strategy for the REST dialect.
///
/// Direct-card: the payload already carries everything the wire needs,
/// so no extra population is required.
pub struct RestProvider {
    settings: RestSettings,
}

impl RestProvider {
    pub fn new(settings: RestSettings) -> Self {
        Self { settings }
    }
}

impl Provider for RestProvider {
    fn name(&self) -> &'static str {
        "rest"
    }

    fn create_client(&self) -> Result<Arc<dyn ProviderClient>, GatewayError> {
        Ok(Arc::new(RestClient::new(&self.settings)?))
    }
}

/// Connected client for the REST dialect.
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestClient {
    pub fn new(settings: &RestSettings) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    fn endpoint(operation: Operation) -> Option<&'static str> {
        match operation {
            Operation::Authorize => Some("/v1/authorizations"),
            Operation::Capture => Some("/v1/captures"),
            Operation::Purchase => Some("/v1/charges"),
            Operation::Refund | Operation::PartialRefund => Some("/v1/refunds"),
            Operation::CreatePaymentSource => Some("/v1/payment-sources"),
            Operation::CompleteAuthorize | Operation::CompletePurchase | Operation::Webhooks => {
                None
            }
        }
    }
}

impl ProviderClient for RestClient {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            authorize: true,
            capture: true,
            complete_authorize: false,
            complete_purchase: false,
            purchase: true,
            refund: true,
            create_payment_source: true,
            webhooks: false,
            partial_refund: true,
        }
    }

    fn request(
        &self,
        operation: Operation,
        payload: &PaymentRequest,
    ) -> Result<Box<dyn ProviderRequest>, GatewayError> {
        let endpoint =
            Self::endpoint(operation).ok_or(GatewayError::UnsupportedOperation(operation))?;
        let body = serde_json::to_value(payload)
            .map_err(|e| GatewayError::Configuration(format!("unserializable payload: {e}")))?;
        Ok(Box::new(RestRequest {
            http: self.http.clone(),
            url: format!("{}{}", self.base_url, endpoint),
            api_key: self.api_key.clone(),
            body,
        }))
    }
}

/// One prepared call against the REST dialect.
pub struct RestRequest {
    http: reqwest::Client,
    url: String,
    api_key: String,
    body: serde_json::Value,
}

impl RestRequest {
    async fn post_json(&self, body: &serde_json::Value) -> Result<RawResponse, TransportError> {
        debug!(url = %self.url, "posting provider request");
        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        parse_reply(resp).await
    }
}

#[async_trait::async_trait]
impl ProviderRequest for RestRequest {
    fn data(&self) -> RequestData {
        RequestData::Json(self.body.clone())
    }

    async fn send(&self) -> Result<RawResponse, TransportError> {
        self.post_json(&self.body).await
    }

    async fn send_data(&self, data: RequestData) -> Result<RawResponse, TransportError> {
        match data {
            RequestData::Json(body) => self.post_json(&body).await,
            RequestData::Form(pairs) => {
                let resp = self
                    .http
                    .post(&self.url)
                    .bearer_auth(&self.api_key)
                    .form(&pairs)
                    .send()
                    .await
                    .map_err(|e| TransportError::Network(e.to_string()))?;
                parse_reply(resp).await
            }
            RequestData::Text(text) => {
                let resp = self
                    .http
                    .post(&self.url)
                    .bearer_auth(&self.api_key)
                    .body(text)
                    .send()
                    .await
                    .map_err(|e| TransportError::Network(e.to_string()))?;
                parse_reply(resp).await
            }
        }
    }

    fn set_transaction_reference(&mut self, reference: &str) {
        if let serde_json::Value::Object(map) = &mut self.body {
            map.insert(
                "transactionReference".to_string(),
                serde_json::Value::String(reference.to_string()),
            );
        }
    }
}

/// The REST dialect's reply envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestReply {
    approved: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    redirect_url: Option<String>,
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

    let payload: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;
    let reply: RestReply = serde_json::from_value(payload.clone())
        .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;

    Ok(RawResponse {
        success: reply.approved,
        message: reply.message,
        reference: reply.id,
        redirect: reply.redirect_url.map(Redirect::get),
        payload,
    })
}
