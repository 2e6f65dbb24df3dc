use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::Result;
use crate::fetcher::Fetcher;

/// Scheme used for `//host/...` URLs, which have no page to inherit one from.
const SCHEME_RELATIVE_DEFAULT: &str = "https:";

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("feedbricks/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

/// Give scheme-relative URLs a concrete scheme.
pub fn absolute_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("{}{}", SCHEME_RELATIVE_DEFAULT, url)
    } else {
        url.to_string()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let url = absolute_url(url);
        let response = self.client.get(&url).send().await?;

        response.error_for_status_ref()?;

        let body = response.bytes().await?.to_vec();
        tracing::debug!("Fetched {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
