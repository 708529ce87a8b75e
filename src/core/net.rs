// src/core/net.rs
// Page fetching. One GET per call, no retries, no cache.

use reqwest::blocking::Client;

use crate::config::ScraperConfig;
use crate::data::RawPage;
use crate::error::NetworkError;

/// Anything that can turn a URL into a page. The scraper only talks to this.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<RawPage, NetworkError>;
}

/// Blocking HTTP(S) fetcher. One shared connection pool for the whole run.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(NetworkError::Client)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<RawPage, NetworkError> {
        let transport = |source: reqwest::Error| {
            if source.is_timeout() {
                NetworkError::Timeout { url: s!(url) }
            } else {
                NetworkError::Transport { url: s!(url), source }
            }
        };

        let resp = self.client.get(url).send().map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NetworkError::Status { url: s!(url), status: status.as_u16() });
        }

        let body = resp.bytes().map_err(transport)?;
        Ok(RawPage::new(url, String::from_utf8_lossy(&body).into_owned()))
    }
}
