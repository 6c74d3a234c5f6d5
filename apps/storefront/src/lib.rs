//! # Fast Food Storefront Library
//!
//! Composition root of the terminal storefront.
//!
//! ## Module Organization
//! ```text
//! fastfood_storefront/
//! ├── lib.rs          ◄─── You are here (wiring & tracing)
//! ├── repl.rs         ◄─── Line parser and read/eval loop
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── Session store container
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/       ◄─── menu, cart, user, login, pay, status, config
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging (stderr, RUST_LOG)                               │
//! │  2. Load StorefrontConfig (defaults < storefront.toml < env < flags)    │
//! │  3. Build Backends (HttpApi, HostedCheckoutProvider, token store)       │
//! │  4. Storefront::start                                                   │
//! │     • StoreState: empty cart, no user, no orders                        │
//! │     • CatalogLoader: GET /api/produits in the background                │
//! │     • CheckoutInitiator: payment client load in the background          │
//! │  5. REPL reads commands from stdin until `quit` or EOF                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod repl;
pub mod state;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use fastfood_client::{
    AuthBackend, Authenticator, CatalogLoader, CatalogSource, CheckoutInitiator, ClientResult,
    FileTokenStore, HostedCheckoutProvider, HttpApi, MemoryTokenStore, PaymentProvider,
    StorefrontConfig, TokenStore,
};
use state::{ConfigState, StoreState};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=fastfood=trace` - Show trace for fastfood crates only
/// - Default: `info,fastfood=debug,reqwest=warn`
///
/// Logs go to stderr so the REPL output on stdout stays readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fastfood=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Backends
// =============================================================================

/// The outside world the storefront talks to.
#[derive(Clone)]
pub struct Backends {
    pub catalog: Arc<dyn CatalogSource>,
    pub auth: Arc<dyn AuthBackend>,
    pub payments: Arc<dyn PaymentProvider>,
    pub tokens: Arc<dyn TokenStore>,
}

impl Backends {
    /// HTTP backends from configuration.
    ///
    /// With `persist` off the token lives in memory and is lost on exit.
    pub fn from_config(config: &StorefrontConfig, persist: bool) -> ClientResult<Self> {
        let api = Arc::new(HttpApi::new(&config.api.base_url)?);

        let tokens: Arc<dyn TokenStore> = if persist {
            let path = config.token_file()?;
            info!(?path, "Using token file");
            Arc::new(FileTokenStore::new(path))
        } else {
            Arc::new(MemoryTokenStore::new())
        };

        Ok(Backends {
            catalog: api.clone(),
            auth: api,
            payments: Arc::new(HostedCheckoutProvider::new(&config.payment.api_base)?),
            tokens,
        })
    }
}

// =============================================================================
// Storefront
// =============================================================================

/// Everything a command may need, built once.
pub struct Storefront {
    pub store: StoreState,
    pub config: ConfigState,
    pub catalog: CatalogLoader,
    pub checkout: CheckoutInitiator,
    pub auth: Authenticator,
}

impl Storefront {
    /// Creates the session store and starts both background loads.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn start(config: StorefrontConfig, backends: Backends) -> Self {
        let catalog = CatalogLoader::start(backends.catalog);
        let checkout = CheckoutInitiator::start(
            backends.payments,
            config.publishable_key().to_string(),
            &config.payment,
        );
        let auth = Authenticator::new(backends.auth, backends.tokens);

        info!(api = %config.api.base_url, "Storefront started");

        Storefront {
            store: StoreState::new(),
            config: ConfigState::new(config),
            catalog,
            checkout,
            auth,
        }
    }
}

// =============================================================================
// Test Fakes
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use fastfood_client::{
        AuthBackend, CatalogLoader, CatalogSource, CheckoutRequest, CheckoutSession, ClientError,
        ClientResult, Credentials, LoginResponse, PaymentClient, PaymentProvider,
    };
    use fastfood_core::Product;

    pub struct FixedCatalog(pub Vec<Product>);

    #[async_trait]
    impl CatalogSource for FixedCatalog {
        async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
            Ok(self.0.clone())
        }
    }

    pub struct NeverCatalog;

    #[async_trait]
    impl CatalogSource for NeverCatalog {
        async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
            std::future::pending().await
        }
    }

    pub async fn wait_loaded(catalog: &CatalogLoader) {
        catalog.wait().await;
    }

    pub struct ScriptedAuth(Option<String>);

    impl ScriptedAuth {
        pub fn accepting(token: &str) -> Self {
            ScriptedAuth(Some(token.to_string()))
        }

        pub fn rejecting() -> Self {
            ScriptedAuth(None)
        }
    }

    #[async_trait]
    impl AuthBackend for ScriptedAuth {
        async fn login(&self, _credentials: &Credentials) -> ClientResult<LoginResponse> {
            match &self.0 {
                Some(token) => Ok(LoginResponse { token: token.clone() }),
                None => Err(ClientError::Http {
                    status: 401,
                    body: String::new(),
                }),
            }
        }
    }

    #[derive(Clone, Copy)]
    enum PaymentsMode {
        NeverLoads,
        Accepts,
        Declines,
    }

    /// Payment provider whose clients count checkouts into `calls`.
    pub struct CountingPayments {
        mode: PaymentsMode,
        pub calls: Arc<AtomicUsize>,
    }

    impl CountingPayments {
        fn with_mode(mode: PaymentsMode) -> Self {
            CountingPayments {
                mode,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn never_loading() -> Self {
            Self::with_mode(PaymentsMode::NeverLoads)
        }

        pub fn ready() -> Self {
            Self::with_mode(PaymentsMode::Accepts)
        }

        pub fn declining() -> Self {
            Self::with_mode(PaymentsMode::Declines)
        }
    }

    struct CountingClient {
        mode: PaymentsMode,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PaymentProvider for CountingPayments {
        async fn load(&self, _publishable_key: &str) -> ClientResult<Arc<dyn PaymentClient>> {
            if let PaymentsMode::NeverLoads = self.mode {
                std::future::pending::<()>().await;
            }
            Ok(Arc::new(CountingClient {
                mode: self.mode,
                calls: self.calls.clone(),
            }))
        }
    }

    #[async_trait]
    impl PaymentClient for CountingClient {
        async fn redirect_to_checkout(&self, _request: &CheckoutRequest) -> ClientResult<CheckoutSession> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.mode {
                PaymentsMode::Declines => Err(ClientError::Checkout("card declined".into())),
                _ => Ok(CheckoutSession {
                    id: "cs_1".into(),
                    url: "https://pay.example/cs_1".into(),
                }),
            }
        }
    }
}
