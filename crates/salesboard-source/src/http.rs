//! HTTP dataset source backed by reqwest

use async_trait::async_trait;
use std::time::Duration;

use crate::{decode_records, DatasetSource, RawTransaction, SourceError};

/// Fetches the dataset with a single bounded GET request
#[derive(Debug, Clone)]
pub struct HttpDatasetSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpDatasetSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }

    fn map_request_error(&self, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::Timeout {
                url: self.url.clone(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if error.is_connect() {
            SourceError::ConnectionFailed {
                url: self.url.clone(),
                message: error.to_string(),
            }
        } else {
            SourceError::Request {
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    async fn fetch(&self) -> Result<Vec<RawTransaction>, SourceError> {
        log::debug!("GET {} (timeout {:?})", self.url, self.timeout);

        let response = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_request_error(e))?;
        decode_records(&body)
    }

    fn location(&self) -> &str {
        &self.url
    }
}
