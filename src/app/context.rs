use std::sync::Arc;
use std::time::Duration;

use crate::app::error::Result;
use crate::config::PipelineConfig;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::parallel::ParallelFetcher;
use crate::fetcher::Fetcher;
use crate::network::AdapterRegistry;
use crate::pipeline::Pipeline;

/// Wires the registry, transport and pipeline together for one config.
pub struct AppContext {
    pub registry: Arc<AdapterRegistry>,
    pub pipeline: Pipeline,
}

impl AppContext {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::with_timeout(
            Duration::from_secs(config.timeout_secs),
        )?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Use a caller-supplied transport instead of HTTP.
    pub fn with_fetcher(
        config: &PipelineConfig,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
    ) -> Self {
        let registry = Arc::new(AdapterRegistry::builtin());
        let parallel_fetcher = ParallelFetcher::with_workers(fetcher, config.workers)
            .with_timeout(Duration::from_secs(config.timeout_secs));
        let pipeline = Pipeline::new(registry.clone(), parallel_fetcher);

        Self { registry, pipeline }
    }
}
