use crate::config::HttpConfig;
use crate::domain::ports::RemoteSource;
use crate::utils::error::{Result, StormError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// `RemoteSource` over plain HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn exists(&self, url: &str) -> Result<bool> {
        tracing::debug!("Checking resource: {}", url);
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| StormError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!("HEAD {} -> {}", url, response.status());
        Ok(response.status().is_success())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Making request to: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StormError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        tracing::debug!("GET {} -> {}", url, status);
        if !status.is_success() {
            return Err(StormError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP status {}", status),
            });
        }

        let body = response.bytes().await.map_err(|e| StormError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!("Received {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}
