//! # Backend API Client
//!
//! The two calls the storefront makes to its backend.
//!
//! ```text
//!   CatalogLoader ──► CatalogSource::fetch_products ──► GET  /api/produits
//!   Authenticator ──► AuthBackend::login            ──► POST /api/connexion
//!                                                        { email, motDePasse }
//!                                                        ◄── { token }
//! ```
//!
//! Both calls are one-shot: no retry, no timeout. A non-success status is
//! reported as [`ClientError::Http`] with the response body attached.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{ClientError, ClientResult};
use fastfood_core::Product;

pub const PRODUCTS_PATH: &str = "/api/produits";
pub const LOGIN_PATH: &str = "/api/connexion";

// =============================================================================
// Wire Types
// =============================================================================

/// Login request body.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    #[serde(rename = "motDePasse")]
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

// =============================================================================
// Seams
// =============================================================================

/// Anything that can hand over the product list.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_products(&self) -> ClientResult<Vec<Product>>;
}

/// Anything that can exchange credentials for a token.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// reqwest-backed client for the storefront backend.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        Ok(HttpApi {
            client: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins an absolute API path onto the base URL, keeping any base path.
    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        Ok(url)
    }
}

/// Turns a non-success response into [`ClientError::Http`].
async fn check_status(resp: Response) -> ClientResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Http {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl CatalogSource for HttpApi {
    async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
        let url = self.endpoint(PRODUCTS_PATH)?;
        debug!(%url, "Fetching products");

        let resp = self.client.get(url).send().await?;
        let products: Vec<Product> = check_status(resp).await?.json().await?;

        info!(count = products.len(), "Products fetched");
        Ok(products)
    }
}

#[async_trait]
impl AuthBackend for HttpApi {
    async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        let url = self.endpoint(LOGIN_PATH)?;
        debug!(%url, email = %credentials.email, "Submitting login");

        let resp = self.client.post(url).json(credentials).send().await?;
        let body: LoginResponse = check_status(resp).await?.json().await?;

        info!(email = %credentials.email, "Login accepted");
        Ok(body)
    }
}
