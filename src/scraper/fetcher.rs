use crate::model::SourceError;

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Shared HTTP client with a browser-like user agent and a fixed timeout.
#[derive(Clone)]
pub struct HttpFetcher {
    pub client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Single GET, no retry. Non-2xx responses are errors.
    pub async fn fetch_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, SourceError> {
        debug!("GET {} {:?}", url, query);
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
