//! # Checkout Commands
//!
//! The pay button.
//!
//! ```text
//!   pay ──► payment client ready? ──no──► "payment is not ready yet"
//!                  │ yes
//!                  ▼
//!           hosted checkout ──► "redirect: https://..."
//! ```
//!
//! Nothing about the cart or the user gates the button.

use std::fmt;

use serde::Serialize;
use tracing::{debug, error};

use crate::error::ApiError;
use fastfood_client::{CheckoutInitiator, CheckoutOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PayResponse {
    NotReady,
    Redirect { session_id: String, url: String },
}

impl fmt::Display for PayResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayResponse::NotReady => write!(f, "payment is not ready yet"),
            PayResponse::Redirect { url, .. } => write!(f, "redirect: {}", url),
        }
    }
}

/// Hands the payment flow to the payment client, if it has loaded.
pub async fn pay(checkout: &CheckoutInitiator) -> Result<PayResponse, ApiError> {
    debug!("pay command");

    match checkout.pay().await {
        Ok(CheckoutOutcome::NotReady) => Ok(PayResponse::NotReady),
        Ok(CheckoutOutcome::Redirect(session)) => Ok(PayResponse::Redirect {
            session_id: session.id,
            url: session.url,
        }),
        Err(e) => {
            error!(error = %e, "Checkout failed");
            Err(ApiError::from(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::CountingPayments;
    use fastfood_client::config::PaymentSettings;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_pay_not_ready() {
        let payments = Arc::new(CountingPayments::never_loading());
        let checkout = CheckoutInitiator::start(payments.clone(), "pk".into(), &PaymentSettings::default());

        let resp = pay(&checkout).await.unwrap();
        assert_eq!(resp, PayResponse::NotReady);
        assert_eq!(resp.to_string(), "payment is not ready yet");
        assert_eq!(payments.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_pay_redirects() {
        let payments = Arc::new(CountingPayments::ready());
        let checkout = CheckoutInitiator::start(payments.clone(), "pk".into(), &PaymentSettings::default());
        checkout.wait().await;

        let resp = pay(&checkout).await.unwrap();
        assert_eq!(resp.to_string(), "redirect: https://pay.example/cs_1");
        assert_eq!(payments.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pay_error() {
        let payments = Arc::new(CountingPayments::declining());
        let checkout = CheckoutInitiator::start(payments, "pk".into(), &PaymentSettings::default());
        checkout.wait().await;

        let err = pay(&checkout).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);
    }
}
