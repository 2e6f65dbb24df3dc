use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::app::FeedbricksError;
use crate::config::{NetworkConfig, Security, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};
use crate::fetcher::Fetcher;
use crate::network::AdapterRegistry;
use crate::request::{self, RequestDescriptor};

/// Settled result for one configured network. `body` is `None` when the
/// request could not be built or failed.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub network: String,
    pub body: Option<Vec<u8>>,
}

pub struct ParallelFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    semaphore: Arc<Semaphore>,
    timeout: Duration,
}

impl ParallelFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self::with_workers(fetcher, DEFAULT_WORKERS)
    }

    pub fn with_workers(fetcher: Arc<dyn Fetcher + Send + Sync>, workers: usize) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch every configured network concurrently.
    ///
    /// Returns one outcome per entry of `networks`, in the same order, once
    /// every request has settled. A network that is unknown, misconfigured,
    /// slow or failing yields `body: None` and never affects the others.
    pub async fn fetch_all(
        &self,
        registry: &AdapterRegistry,
        networks: &[NetworkConfig],
        security: Security,
    ) -> Vec<FetchOutcome> {
        let pending = networks.iter().map(|network| {
            let name = network.name.clone();

            let handle = match registry
                .resolve(&network.name)
                .and_then(|adapter| request::build(adapter, network, security))
            {
                Ok(request) => {
                    let fetcher = self.fetcher.clone();
                    let semaphore = self.semaphore.clone();
                    let timeout = self.timeout;

                    Some(tokio::spawn(async move {
                        let Ok(_permit) = semaphore.acquire().await else {
                            return None;
                        };
                        fetch_single(&fetcher, &request, timeout).await
                    }))
                }
                Err(e) => {
                    tracing::warn!("Skipping network {}: {}", name, e);
                    None
                }
            };

            async move {
                let body = match handle {
                    Some(handle) => handle.await.unwrap_or_else(|e| {
                        tracing::error!("Task join error for {}: {}", name, e);
                        None
                    }),
                    None => None,
                };
                FetchOutcome {
                    network: name,
                    body,
                }
            }
        });

        join_all(pending).await
    }
}

async fn fetch_single(
    fetcher: &Arc<dyn Fetcher + Send + Sync>,
    request: &RequestDescriptor,
    timeout: Duration,
) -> Option<Vec<u8>> {
    let result = match tokio::time::timeout(timeout, fetcher.fetch(&request.url)).await {
        Ok(result) => result,
        Err(_) => Err(FeedbricksError::Timeout {
            url: request.url.clone(),
            secs: timeout.as_secs(),
        }),
    };

    match result {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::warn!("Fetching {} failed: {}", request.network, e);
            None
        }
    }
}
