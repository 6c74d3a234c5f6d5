//! # Checkout Initiator
//!
//! Acquires a payment client in the background and hands the whole payment
//! flow to it when the user asks to pay.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  start(provider, key) ──spawn──► provider.load(key)                     │
//! │                                                                         │
//! │  ┌─────────┐   Ok(client)   ┌──────────────┐                            │
//! │  │ Pending │ ─────────────► │ Ready(client)│                            │
//! │  └────┬────┘                └──────┬───────┘                            │
//! │       │   Err(e)   ┌────────┐      │ pay()                              │
//! │       └──────────► │ Failed │      ▼                                    │
//! │                    └────────┘   client.redirect_to_checkout(request)   │
//! │                                                                         │
//! │  pay() while Pending or Failed ──► NotReady, nothing sent               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The request is the same on every call apart from its order number: one
//! line item of the configured price, quantity 1. The cart is not consulted.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::PaymentSettings;
use crate::error::ClientResult;
use fastfood_core::OrderNumber;

// =============================================================================
// Checkout Request
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Provider-side price identifier.
    pub price: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    Payment,
    Subscription,
}

impl CheckoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutMode::Payment => "payment",
            CheckoutMode::Subscription => "subscription",
        }
    }
}

/// What the payment client is asked to start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    pub line_items: Vec<LineItem>,
    pub mode: CheckoutMode,
    pub success_url: String,
    pub cancel_url: String,
    pub client_reference_id: Option<OrderNumber>,
}

impl CheckoutRequest {
    /// The single-item request built from configuration.
    pub fn from_settings(settings: &PaymentSettings) -> Self {
        CheckoutRequest {
            line_items: vec![LineItem {
                price: settings.price_id.clone(),
                quantity: 1,
            }],
            mode: settings.mode,
            success_url: settings.success_url.clone(),
            cancel_url: settings.cancel_url.clone(),
            client_reference_id: None,
        }
    }

    pub fn with_order_number(mut self, number: OrderNumber) -> Self {
        self.client_reference_id = Some(number);
        self
    }
}

/// A hosted checkout the user should be sent to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

// =============================================================================
// Provider Seams
// =============================================================================

/// Produces a payment client for a publishable key.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    async fn load(&self, publishable_key: &str) -> ClientResult<Arc<dyn PaymentClient>>;
}

/// A loaded payment client.
#[async_trait]
pub trait PaymentClient: Send + Sync {
    async fn redirect_to_checkout(&self, request: &CheckoutRequest) -> ClientResult<CheckoutSession>;
}

// =============================================================================
// Initiator
// =============================================================================

#[derive(Clone)]
pub enum PaymentClientStatus {
    Pending,
    Ready(Arc<dyn PaymentClient>),
    Failed(String),
}

impl fmt::Debug for PaymentClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentClientStatus::Pending => f.write_str("Pending"),
            PaymentClientStatus::Ready(_) => f.write_str("Ready"),
            PaymentClientStatus::Failed(reason) => f.debug_tuple("Failed").field(reason).finish(),
        }
    }
}

impl PaymentClientStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, PaymentClientStatus::Ready(_))
    }

    pub fn label(&self) -> String {
        match self {
            PaymentClientStatus::Pending => "pending".to_string(),
            PaymentClientStatus::Ready(_) => "ready".to_string(),
            PaymentClientStatus::Failed(reason) => format!("failed: {}", reason),
        }
    }
}

/// Result of pressing the pay button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The payment client has not loaded (yet). Nothing was sent.
    NotReady,
    /// The hosted checkout to redirect to.
    Redirect(CheckoutSession),
}

pub struct CheckoutInitiator {
    status: watch::Receiver<PaymentClientStatus>,
    request: CheckoutRequest,
    task: JoinHandle<()>,
}

impl CheckoutInitiator {
    /// Spawns the payment client load on the current tokio runtime.
    pub fn start(
        provider: Arc<dyn PaymentProvider>,
        publishable_key: String,
        settings: &PaymentSettings,
    ) -> Self {
        let (tx, rx) = watch::channel(PaymentClientStatus::Pending);

        let task = tokio::spawn(async move {
            let next = match provider.load(&publishable_key).await {
                Ok(client) => {
                    info!("Payment client ready");
                    PaymentClientStatus::Ready(client)
                }
                Err(e) => {
                    error!(error = %e, "Payment client failed to load");
                    PaymentClientStatus::Failed(e.to_string())
                }
            };
            let _ = tx.send(next);
        });

        CheckoutInitiator {
            status: rx,
            request: CheckoutRequest::from_settings(settings),
            task,
        }
    }

    pub fn status(&self) -> PaymentClientStatus {
        self.status.borrow().clone()
    }

    /// Resolves once the payment client has loaded or failed.
    pub async fn wait(&self) -> PaymentClientStatus {
        let mut rx = self.status.clone();
        let settled = match rx
            .wait_for(|s| !matches!(s, PaymentClientStatus::Pending))
            .await
        {
            Ok(status) => (*status).clone(),
            Err(_) => self.status(),
        };
        settled
    }

    /// Starts a hosted checkout if the payment client is ready.
    pub async fn pay(&self) -> ClientResult<CheckoutOutcome> {
        let client = match self.status() {
            PaymentClientStatus::Ready(client) => client,
            other => {
                debug!(status = ?other, "Pay pressed before payment client was ready");
                return Ok(CheckoutOutcome::NotReady);
            }
        };

        let request = self
            .request
            .clone()
            .with_order_number(OrderNumber::generate(Utc::now()));
        debug!(order = ?request.client_reference_id, "Starting hosted checkout");

        let session = client.redirect_to_checkout(&request).await?;
        info!(session = %session.id, "Checkout session created");
        Ok(CheckoutOutcome::Redirect(session))
    }
}

impl Drop for CheckoutInitiator {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct CountingClient {
        calls: AtomicUsize,
        requests: Mutex<Vec<CheckoutRequest>>,
        fail: bool,
    }

    #[async_trait]
    impl PaymentClient for CountingClient {
        async fn redirect_to_checkout(&self, request: &CheckoutRequest) -> ClientResult<CheckoutSession> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(ClientError::Checkout("card declined".into()));
            }
            Ok(CheckoutSession {
                id: "cs_test_1".into(),
                url: "https://checkout.example/cs_test_1".into(),
            })
        }
    }

    /// Hands out `client` once `gate` is notified, or fails when `client` is None.
    struct GatedProvider {
        client: Option<Arc<CountingClient>>,
        gate: Arc<Notify>,
        keys: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PaymentProvider for GatedProvider {
        async fn load(&self, publishable_key: &str) -> ClientResult<Arc<dyn PaymentClient>> {
            self.keys.lock().unwrap().push(publishable_key.to_string());
            self.gate.notified().await;
            match &self.client {
                Some(client) => Ok(client.clone() as Arc<dyn PaymentClient>),
                None => Err(ClientError::PaymentUnavailable("script blocked".into())),
            }
        }
    }

    fn provider(client: Option<Arc<CountingClient>>) -> (Arc<GatedProvider>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let provider = Arc::new(GatedProvider {
            client,
            gate: gate.clone(),
            keys: Mutex::new(Vec::new()),
        });
        (provider, gate)
    }

    #[tokio::test]
    async fn test_pay_before_ready_sends_nothing() {
        let client = Arc::new(CountingClient::default());
        let (provider, gate) = provider(Some(client.clone()));
        let initiator =
            CheckoutInitiator::start(provider, "pk_test".into(), &PaymentSettings::default());

        assert_eq!(initiator.pay().await.unwrap(), CheckoutOutcome::NotReady);
        assert_eq!(initiator.pay().await.unwrap(), CheckoutOutcome::NotReady);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);

        // Becoming ready later does not replay the earlier presses.
        gate.notify_one();
        assert!(initiator.wait().await.is_ready());
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pay_sends_fixed_request() {
        let client = Arc::new(CountingClient::default());
        let (provider, gate) = provider(Some(client.clone()));
        gate.notify_one();

        let initiator = CheckoutInitiator::start(
            provider.clone(),
            "pk_test_votrecle".into(),
            &PaymentSettings::default(),
        );
        initiator.wait().await;

        let outcome = initiator.pay().await.unwrap();
        assert_eq!(
            outcome,
            CheckoutOutcome::Redirect(CheckoutSession {
                id: "cs_test_1".into(),
                url: "https://checkout.example/cs_test_1".into(),
            })
        );
        initiator.pay().await.unwrap();

        assert_eq!(*provider.keys.lock().unwrap(), vec!["pk_test_votrecle".to_string()]);

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        for request in requests.iter() {
            assert_eq!(
                request.line_items,
                vec![LineItem {
                    price: "prix_example".into(),
                    quantity: 1
                }]
            );
            assert_eq!(request.mode, CheckoutMode::Payment);
            assert_eq!(request.success_url, "/confirmation");
            assert_eq!(request.cancel_url, "/annulation");
            let number = request.client_reference_id.as_ref().unwrap();
            assert!(number.as_str().starts_with("CMD-"));
        }
    }

    #[tokio::test]
    async fn test_checkout_error_is_returned() {
        let client = Arc::new(CountingClient {
            fail: true,
            ..Default::default()
        });
        let (provider, gate) = provider(Some(client.clone()));
        gate.notify_one();

        let initiator = CheckoutInitiator::start(provider, "pk".into(), &PaymentSettings::default());
        initiator.wait().await;

        assert!(matches!(initiator.pay().await, Err(ClientError::Checkout(_))));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_ready() {
        let (provider, gate) = provider(None);
        gate.notify_one();

        let initiator = CheckoutInitiator::start(provider, "pk".into(), &PaymentSettings::default());
        let status = initiator.wait().await;

        assert_eq!(status.label(), "failed: Payment provider unavailable: script blocked");
        assert_eq!(initiator.pay().await.unwrap(), CheckoutOutcome::NotReady);
    }

    #[test]
    fn test_request_carries_configured_mode() {
        let settings = PaymentSettings {
            mode: CheckoutMode::Subscription,
            ..PaymentSettings::default()
        };
        let request = CheckoutRequest::from_settings(&settings);
        assert_eq!(request.mode, CheckoutMode::Subscription);
        assert_eq!(request.mode.as_str(), "subscription");
    }
}
