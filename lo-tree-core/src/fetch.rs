//! HTTP implementation of [`SummaryFetcher`] backed by `reqwest`.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::contract::SummaryFetcher;
use crate::error::CollaboratorError;

/// Plain GET, no authentication, no retry. Non-2xx responses are errors.
#[derive(Debug, Clone, Default)]
pub struct HttpSummaryFetcher {
    client: Client,
}

impl HttpSummaryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        HttpSummaryFetcher { client }
    }
}

#[async_trait]
impl SummaryFetcher for HttpSummaryFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CollaboratorError> {
        info!(url = %url, "Fetching course summary");
        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = ?e, url = %url, "Course summary request failed");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "Course summary endpoint returned error");
            return Err(format!("unexpected status {status} from {url}").into());
        }

        let body = response.text().await?;
        debug!(url = %url, bytes = body.len(), "Course summary body received");
        Ok(body)
    }
}
