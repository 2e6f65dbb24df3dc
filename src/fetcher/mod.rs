pub mod http_fetcher;
pub mod parallel;

use async_trait::async_trait;

use crate::app::Result;

/// Transport capability: GET a URL and return the response body.
///
/// Implementations return an error for transport failures and non-success
/// statuses; the orchestrator turns those into an absent result.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
