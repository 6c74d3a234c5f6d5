//! # Hosted Checkout Provider
//!
//! reqwest implementation of [`PaymentProvider`] for a hosted checkout API.
//!
//! ```text
//!   POST {api_base}/v1/checkout/sessions
//!   Authorization: Bearer <key>
//!   Content-Type: application/x-www-form-urlencoded
//!
//!   line_items[0][price]=prix_example
//!   line_items[0][quantity]=1
//!   mode=payment
//!   success_url=/confirmation
//!   cancel_url=/annulation
//!   client_reference_id=CMD-1700000000000
//!
//!   ◄── { "id": "cs_...", "url": "https://..." }
//! ```
//!
//! The configured key goes out unchanged as the bearer token, and the redirect
//! URLs are sent as configured. Stripe itself wants a secret key and absolute
//! URLs here, so a live deployment points `api_base` at a server-side proxy.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::checkout::{CheckoutRequest, CheckoutSession, PaymentClient, PaymentProvider};
use crate::error::{ClientError, ClientResult};

pub const CHECKOUT_SESSIONS_PATH: &str = "/v1/checkout/sessions";

/// Loads [`HostedCheckoutClient`]s against one API root.
#[derive(Debug, Clone)]
pub struct HostedCheckoutProvider {
    client: Client,
    api_base: Url,
}

impl HostedCheckoutProvider {
    pub fn new(api_base: &str) -> ClientResult<Self> {
        Ok(HostedCheckoutProvider {
            client: Client::new(),
            api_base: Url::parse(api_base)?,
        })
    }
}

#[async_trait]
impl PaymentProvider for HostedCheckoutProvider {
    async fn load(&self, publishable_key: &str) -> ClientResult<Arc<dyn PaymentClient>> {
        if publishable_key.trim().is_empty() {
            return Err(ClientError::PaymentUnavailable("no publishable key configured".into()));
        }

        let endpoint = self.api_base.join(CHECKOUT_SESSIONS_PATH)?;
        debug!(%endpoint, "Payment client loaded");

        Ok(Arc::new(HostedCheckoutClient {
            client: self.client.clone(),
            endpoint,
            key: SecretString::from(publishable_key.to_string()),
        }))
    }
}

/// A payment client bound to one key.
#[derive(Debug)]
pub struct HostedCheckoutClient {
    client: Client,
    endpoint: Url,
    key: SecretString,
}

/// Flattens a request into the provider's bracketed form encoding.
fn form_fields(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for (i, item) in request.line_items.iter().enumerate() {
        fields.push((format!("line_items[{}][price]", i), item.price.clone()));
        fields.push((format!("line_items[{}][quantity]", i), item.quantity.to_string()));
    }
    fields.push(("mode".into(), request.mode.as_str().into()));
    fields.push(("success_url".into(), request.success_url.clone()));
    fields.push(("cancel_url".into(), request.cancel_url.clone()));
    if let Some(number) = &request.client_reference_id {
        fields.push(("client_reference_id".into(), number.to_string()));
    }
    fields
}

#[async_trait]
impl PaymentClient for HostedCheckoutClient {
    async fn redirect_to_checkout(&self, request: &CheckoutRequest) -> ClientResult<CheckoutSession> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.key.expose_secret())
            .form(&form_fields(request))
            .send()
            .await
            .map_err(|e| ClientError::Checkout(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Checkout(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        Ok(resp.json().await?)
    }
}
