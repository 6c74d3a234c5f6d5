//! # Login Form
//!
//! Holds what the user typed and exchanges it for a token.
//!
//! ```text
//!   LoginForm { email, password }
//!        │ submit
//!        ▼
//!   AuthBackend::login ──Ok(token)──► TokenStore::save("token", token)
//!        │
//!        └──Err(e)──► returned to caller, stored token untouched
//! ```
//!
//! A successful login does not touch the session's `user` slot. The stored
//! token is written only; nothing in the storefront reads it back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::api::{AuthBackend, Credentials};
use crate::error::{ClientError, ClientResult};
use crate::token_store::TokenStore;
use fastfood_core::TOKEN_STORAGE_KEY;

// =============================================================================
// Form State
// =============================================================================

/// The two login inputs. Nothing is validated; empty values are sent as-is.
#[derive(Debug, Clone)]
pub struct LoginForm {
    email: String,
    password: SecretString,
}

impl Default for LoginForm {
    fn default() -> Self {
        LoginForm {
            email: String::new(),
            password: SecretString::from(String::new()),
        }
    }
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginForm {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.expose_secret().to_string(),
        }
    }
}

// =============================================================================
// Authenticator
// =============================================================================

/// Submits login forms and persists the returned token.
#[derive(Clone)]
pub struct Authenticator {
    backend: Arc<dyn AuthBackend>,
    store: Arc<dyn TokenStore>,
    saved: Arc<AtomicBool>,
}

impl Authenticator {
    pub fn new(backend: Arc<dyn AuthBackend>, store: Arc<dyn TokenStore>) -> Self {
        Authenticator {
            backend,
            store,
            saved: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sends one login request and stores the token on success.
    ///
    /// Returns the token that was stored. The store is written off the async
    /// worker threads since file backends block.
    pub async fn submit(&self, form: &LoginForm) -> ClientResult<String> {
        debug!(email = %form.email, "Login form submitted");

        let response = self.backend.login(&form.credentials()).await?;

        let store = self.store.clone();
        let token = response.token.clone();
        tokio::task::spawn_blocking(move || store.save(TOKEN_STORAGE_KEY, &token))
            .await
            .map_err(|e| ClientError::Storage(format!("token write aborted: {}", e)))??;
        self.saved.store(true, Ordering::SeqCst);

        info!(email = %form.email, "Token stored");
        Ok(response.token)
    }

    /// Whether a login in this session has stored a token.
    pub fn token_saved(&self) -> bool {
        self.saved.load(Ordering::SeqCst)
    }
}
