//! # Catalog Loader
//!
//! Fetches the product list once and publishes the outcome.
//!
//! ## Status Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   start() ──spawn──► fetch_products()                                   │
//! │                                                                         │
//! │   ┌─────────┐   Ok(products)    ┌──────────────────┐                    │
//! │   │ Pending │ ────────────────► │ Loaded(products) │                    │
//! │   └────┬────┘                   └──────────────────┘                    │
//! │        │        Err(e)          ┌──────────────────┐                    │
//! │        └──────────────────────► │ Failed(reason)   │                    │
//! │                                 └──────────────────┘                    │
//! │                                                                         │
//! │   One fetch per loader. No retry, no timeout, no way back to Pending.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers never block: [`CatalogLoader::products`] is empty until the list
//! arrives and stays empty if the fetch failed.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::CatalogSource;
use fastfood_core::{group_by_category, Category, Product, ProductGroup};

/// Observable outcome of the single catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    Pending,
    Loaded(Arc<Vec<Product>>),
    Failed(String),
}

impl CatalogStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, CatalogStatus::Pending)
    }

    pub fn label(&self) -> String {
        match self {
            CatalogStatus::Pending => "pending".to_string(),
            CatalogStatus::Loaded(products) => format!("loaded ({} products)", products.len()),
            CatalogStatus::Failed(reason) => format!("failed: {}", reason),
        }
    }
}

/// Owns the background fetch. Dropping the loader aborts a fetch still in flight.
pub struct CatalogLoader {
    status: watch::Receiver<CatalogStatus>,
    task: JoinHandle<()>,
}

impl CatalogLoader {
    /// Spawns the fetch on the current tokio runtime.
    pub fn start(source: Arc<dyn CatalogSource>) -> Self {
        let (tx, rx) = watch::channel(CatalogStatus::Pending);

        let task = tokio::spawn(async move {
            let next = match source.fetch_products().await {
                Ok(products) => {
                    info!(count = products.len(), "Catalog loaded");
                    CatalogStatus::Loaded(Arc::new(products))
                }
                Err(e) => {
                    error!(error = %e, "Catalog fetch failed");
                    CatalogStatus::Failed(e.to_string())
                }
            };
            // Receivers may already be gone; nothing to report then.
            let _ = tx.send(next);
        });

        CatalogLoader { status: rx, task }
    }

    pub fn status(&self) -> CatalogStatus {
        self.status.borrow().clone()
    }

    /// The loaded list, or an empty one while pending or after a failure.
    pub fn products(&self) -> Arc<Vec<Product>> {
        match &*self.status.borrow() {
            CatalogStatus::Loaded(products) => Arc::clone(products),
            _ => Arc::new(Vec::new()),
        }
    }

    /// Category grouping of whatever is currently loaded.
    pub fn groups(&self, categories: &[Category]) -> Vec<ProductGroup> {
        group_by_category(categories, &self.products())
    }

    /// Resolves once the status has left `Pending`.
    pub async fn wait(&self) -> CatalogStatus {
        let mut rx = self.status.clone();
        let settled = match rx.wait_for(|s| !s.is_pending()).await {
            Ok(status) => (*status).clone(),
            // Sender dropped without publishing (task aborted or panicked).
            Err(_) => self.status(),
        };
        settled
    }
}

impl Drop for CatalogLoader {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, ClientResult};
    use async_trait::async_trait;
    use fastfood_core::{default_categories, Money};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FixedSource {
        products: Vec<Product>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogSource for FixedSource {
        async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.products.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
            Err(ClientError::Network("connection refused".into()))
        }
    }

    struct NeverSource;

    #[async_trait]
    impl CatalogSource for NeverSource {
        async fn fetch_products(&self) -> ClientResult<Vec<Product>> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_loads_once_and_groups() {
        let source = Arc::new(FixedSource {
            products: vec![Product::new(1, "X", "Burgers", Money::from_cents(500))],
            calls: AtomicUsize::new(0),
        });
        let loader = CatalogLoader::start(source.clone());

        let status = loader.wait().await;
        assert!(matches!(status, CatalogStatus::Loaded(ref p) if p.len() == 1));

        let groups = loader.groups(&default_categories());
        assert_eq!(groups[0].lines("€"), vec!["X - 5€".to_string()]);
        assert!(groups[1].is_empty());

        // Reading again does not refetch.
        let _ = loader.products();
        let _ = loader.wait().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_renders_empty() {
        let loader = CatalogLoader::start(Arc::new(FailingSource));

        let status = loader.wait().await;
        assert_eq!(
            status,
            CatalogStatus::Failed("Network error: connection refused".to_string())
        );
        assert!(loader.products().is_empty());
        assert!(loader.groups(&default_categories()).iter().all(ProductGroup::is_empty));
    }

    #[tokio::test]
    async fn test_pending_fetch_renders_empty_groups() {
        let loader = CatalogLoader::start(Arc::new(NeverSource));
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(loader.status().is_pending());
        let groups = loader.groups(&default_categories());
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(ProductGroup::is_empty));

        let waited = tokio::time::timeout(Duration::from_millis(20), loader.wait()).await;
        assert!(waited.is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(CatalogStatus::Pending.label(), "pending");
        assert_eq!(
            CatalogStatus::Loaded(Arc::new(Vec::new())).label(),
            "loaded (0 products)"
        );
        assert_eq!(CatalogStatus::Failed("x".into()).label(), "failed: x");
    }
}
